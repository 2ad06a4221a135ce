use crate::artist::Artist;
use crate::track::Track;
use std::fmt;

/// The top tracks and artists under one heading.
pub struct TopView<'a> {
    pub tracks: &'a [Track],
    pub artists: &'a [Artist],
}

impl fmt::Display for TopView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\nYour Spotify Music Data")?;
        writeln!(f, "={}", "=".repeat(30))?;

        writeln!(f, "\nTop Tracks:")?;
        for (i, track) in self.tracks.iter().enumerate() {
            writeln!(f, "{}. {} - {}", i + 1, track.name, track.artist_names())?;
        }

        writeln!(f, "\nTop Artists:")?;
        for (i, artist) in self.artists.iter().enumerate() {
            writeln!(f, "{}. {}", i + 1, artist.name)?;
        }
        Ok(())
    }
}

pub fn format_top(tracks: &[Track], artists: &[Artist]) -> String {
    TopView { tracks, artists }.to_string()
}
