use std::path::PathBuf;

/// Filename of the HLS playlist, identical on local disk and at the
/// published destination.
pub const PLAYLIST_FILE_NAME: &str = "master.m3u8";

/// A video-on-demand HLS bundle written under a single local directory:
/// one playlist plus the segment files it references.
#[derive(Debug, Clone)]
pub struct StreamingBundle {
    pub dir: PathBuf,
    pub playlist: PathBuf,
    pub segments: Vec<PathBuf>,
}

impl StreamingBundle {
    /// Destination path of the playlist under a processed prefix.
    pub fn published_playlist_path(processed_prefix: &str) -> String {
        format!("{}/{}", processed_prefix, PLAYLIST_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_prefix_when_building_playlist_path_then_suffix_is_fixed() {
        assert_eq!(
            StreamingBundle::published_playlist_path("sessions/42"),
            "sessions/42/master.m3u8"
        );
    }
}
