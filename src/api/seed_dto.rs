use serde::Deserialize;

/// Top-level shape of the JSON seed catalog.
#[derive(Debug, Deserialize)]
pub struct SeedDto {
    pub movies: Vec<MovieDto>,
    pub theaters: Vec<TheaterDto>,
    pub links: Vec<LinkDto>,
}

#[derive(Debug, Deserialize)]
pub struct MovieDto {
    pub id: u32,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct TheaterDto {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDto {
    pub movie_id: u32,
    pub theater_ids: Vec<u32>,
}
