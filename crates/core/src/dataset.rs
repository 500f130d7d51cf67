use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKey {
    #[default]
    Kickstarter,
    VideoGames,
    Movies,
}

impl DatasetKey {
    pub const ALL: [DatasetKey; 3] = [
        DatasetKey::Kickstarter,
        DatasetKey::VideoGames,
        DatasetKey::Movies,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetKey::Kickstarter => "kickstarter",
            DatasetKey::VideoGames => "videogames",
            DatasetKey::Movies => "movies",
        }
    }

    /// Exact, case-sensitive match on the query key. Anything else is `None`.
    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }

    pub fn descriptor(&self) -> &'static DatasetDescriptor {
        match self {
            DatasetKey::Kickstarter => &DATASETS[0],
            DatasetKey::VideoGames => &DATASETS[1],
            DatasetKey::Movies => &DATASETS[2],
        }
    }
}

impl std::fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetDescriptor {
    pub key: DatasetKey,
    pub title: &'static str,
    pub description: &'static str,
    pub source_url: &'static str,
}

static DATASETS: [DatasetDescriptor; 3] = [
    DatasetDescriptor {
        key: DatasetKey::Kickstarter,
        title: "Kickstarter Pledges",
        description: "Top 100 Most Pledged Kickstarter Campaigns Grouped By Category",
        source_url: "https://cdn.freecodecamp.org/testable-projects-fcc/data/tree_map/kickstarter-funding-data.json",
    },
    DatasetDescriptor {
        key: DatasetKey::VideoGames,
        title: "Video Game Sales",
        description: "Top 100 Most Sold Video Games",
        source_url: "https://cdn.freecodecamp.org/testable-projects-fcc/data/tree_map/video-game-sales-data.json",
    },
    DatasetDescriptor {
        key: DatasetKey::Movies,
        title: "Movie Sales",
        description: "Top 100 Highest Grossing Movies Grouped By Genre",
        source_url: "https://cdn.freecodecamp.org/testable-projects-fcc/data/tree_map/movie-data.json",
    },
];

/// Pick the dataset for a query key. Absent or unknown keys fall back to
/// the default dataset without error.
pub fn select(key: Option<&str>) -> &'static DatasetDescriptor {
    match key.and_then(DatasetKey::parse) {
        Some(k) => k.descriptor(),
        None => {
            if let Some(k) = key {
                tracing::debug!(key = k, "unknown dataset key, using default");
            }
            DatasetKey::default().descriptor()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA_ROOT: &str = "https://cdn.freecodecamp.org/testable-projects-fcc/data/tree_map";

    #[test]
    fn known_keys_select_their_descriptor() {
        assert_eq!(select(Some("movies")).title, "Movie Sales");
        assert_eq!(select(Some("videogames")).key, DatasetKey::VideoGames);
        assert_eq!(select(Some("kickstarter")).key, DatasetKey::Kickstarter);
    }

    #[test]
    fn unknown_key_matches_absent_key() {
        assert_eq!(select(Some("foo")), select(None));
        assert_eq!(select(Some("")), select(None));
        assert_eq!(select(Some("Movies")).key, DatasetKey::Kickstarter);
    }

    #[test]
    fn urls_live_under_the_data_root() {
        for key in DatasetKey::ALL {
            let d = key.descriptor();
            assert_eq!(d.key, key);
            assert!(d.source_url.starts_with(DATA_ROOT), "{}", d.source_url);
        }
    }
}
