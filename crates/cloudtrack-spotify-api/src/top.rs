use crate::artist::Artist;
use crate::bearer_token::BearerToken;
use crate::fetch::fetch;
use crate::paging::Paging;
use crate::track::Track;

pub const API_URL: &str = "https://api.spotify.com/v1";

fn top_url(kind: &str, limit: u32) -> String {
    format!("{}/me/top/{}?limit={}", API_URL, kind, limit)
}

/// https://developer.spotify.com/documentation/web-api/reference/get-users-top-artists-and-tracks
pub async fn get_top_tracks(limit: u32, bearer: &BearerToken) -> eyre::Result<Paging<Track>> {
    fetch(&top_url("tracks", limit), bearer).await
}

/// https://developer.spotify.com/documentation/web-api/reference/get-users-top-artists-and-tracks
pub async fn get_top_artists(limit: u32, bearer: &BearerToken) -> eyre::Result<Paging<Artist>> {
    fetch(&top_url("artists", limit), bearer).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_top_urls() {
        assert_eq!(
            top_url("tracks", 10),
            "https://api.spotify.com/v1/me/top/tracks?limit=10"
        );
        assert_eq!(
            top_url("artists", 5),
            "https://api.spotify.com/v1/me/top/artists?limit=5"
        );
    }

    #[test]
    fn decodes_top_tracks_page() {
        let body = r#"{
            "href": "https://api.spotify.com/v1/me/top/tracks",
            "items": [{
                "album": {
                    "album_type": "album",
                    "id": "al1",
                    "images": [{"url": "https://i.scdn.co/image/x", "height": 640, "width": 640}],
                    "name": "Album",
                    "release_date": "2020-01-01",
                    "total_tracks": 10
                },
                "artists": [
                    {"external_urls": {"spotify": "https://open.spotify.com/artist/a1"},
                     "href": "https://api.spotify.com/v1/artists/a1",
                     "id": "a1", "name": "First", "type": "artist", "uri": "spotify:artist:a1"},
                    {"external_urls": {"spotify": "https://open.spotify.com/artist/a2"},
                     "href": "https://api.spotify.com/v1/artists/a2",
                     "id": "a2", "name": "Second", "type": "artist", "uri": "spotify:artist:a2"}
                ],
                "duration_ms": 200000,
                "explicit": false,
                "external_urls": {"spotify": "https://open.spotify.com/track/t1"},
                "href": "https://api.spotify.com/v1/tracks/t1",
                "id": "t1",
                "name": "Song",
                "popularity": 70,
                "uri": "spotify:track:t1"
            }],
            "limit": 10, "offset": 0, "total": 1, "next": null, "previous": null
        }"#;
        let page: Paging<Track> = serde_json::from_str(body).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Song");
        assert_eq!(page.items[0].artist_names(), "First, Second");
    }

    #[test]
    fn decodes_top_artists_page() {
        let body = r#"{
            "items": [{
                "external_urls": {"spotify": "https://open.spotify.com/artist/a1"},
                "followers": {"href": null, "total": 5},
                "genres": ["ambient"],
                "href": "https://api.spotify.com/v1/artists/a1",
                "id": "a1",
                "images": [],
                "name": "First",
                "popularity": 50,
                "type": "artist",
                "uri": "spotify:artist:a1"
            }],
            "limit": 10, "offset": 0, "total": 1, "next": null, "previous": null
        }"#;
        let page: Paging<Artist> = serde_json::from_str(body).unwrap();
        assert_eq!(page.items[0].name, "First");
        assert_eq!(page.items[0].genres, vec!["ambient"]);
    }
}
