use cloudtrack_init::init;
use cloudtrack_spotify_api::auth::pkce::get_bearer_token_via_pkce;
use cloudtrack_spotify_api::config::SpotifyConfig;
use cloudtrack_spotify_api::display::format_top;
use cloudtrack_spotify_api::top::get_top_artists;
use cloudtrack_spotify_api::top::get_top_tracks;
use eyre::WrapErr;

const TOP_LIMIT: u32 = 10;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    init()?;

    let config = SpotifyConfig::from_env()?;
    let bearer = get_bearer_token_via_pkce(&config)
        .await
        .wrap_err("Failed to get Spotify client")?;

    println!("Fetching your Spotify data...");

    let top_tracks = get_top_tracks(TOP_LIMIT, &bearer)
        .await
        .wrap_err("Error fetching top tracks")?;
    let top_artists = get_top_artists(TOP_LIMIT, &bearer)
        .await
        .wrap_err("Error fetching top artists")?;

    print!("{}", format_top(&top_tracks.items, &top_artists.items));

    Ok(())
}
