pub mod artist;
pub mod bearer_token;
pub mod config;
pub mod display;
pub mod fetch;
pub mod paging;
pub mod top;
pub mod track;
pub mod uri;
pub mod auth {
    pub mod callback;
    pub mod pkce;
}
