//! Loading a match bundle from disk and naming the match.

use rand::Rng;

/// One row for the `matches` table.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MatchRow {
    pub match_id: String,
    pub tournament_id: String,
    pub date: chrono::DateTime<chrono::Local>,
    pub team1: String,
    pub team2: String,
    pub map_name: String,
}

/// A decoded bundle together with the identity derived for it.
#[derive(Debug, Clone)]
pub struct ParsedMatch {
    pub match_id: String,
    pub matches_row: MatchRow,
    pub data: common::RawMatchData,
}

#[derive(Debug)]
pub enum ExtractError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    TeamDiscovery {
        source_file: String,
        found: Vec<String>,
    },
}

impl From<std::io::Error> for ExtractError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ExtractError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "Reading match bundle: {}", err),
            Self::Parse(err) => write!(f, "Decoding match bundle: {}", err),
            Self::TeamDiscovery { source_file, found } => write!(
                f,
                "Could not determine two distinct teams from {}, found {:?}",
                source_file, found
            ),
        }
    }
}

impl std::error::Error for ExtractError {}

/// Decodes the bundle at `path` and derives the match identity from it.
///
/// The tournament id is the name of the directory holding the bundle and the
/// match date is the file's modification time. Both teams have to show up
/// with a clan name somewhere in the tick samples, otherwise the match is
/// rejected here before any transform runs.
#[tracing::instrument]
pub fn parse_bundle(path: &std::path::Path) -> Result<ParsedMatch, ExtractError> {
    let raw = std::fs::read(path)?;
    let data: common::RawMatchData = serde_json::from_slice(&raw)?;

    let teams = discover_teams(&data.ticks);
    let (team1, team2) = match &teams[..] {
        [first, second, ..] => (first.clone(), second.clone()),
        _ => {
            return Err(ExtractError::TeamDiscovery {
                source_file: display_name(path),
                found: teams,
            })
        }
    };

    let tournament_id = path
        .parent()
        .and_then(|dir| dir.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let modified = std::fs::metadata(path)?.modified()?;
    let date = chrono::DateTime::<chrono::Local>::from(modified);

    let match_id = create_match_id(&tournament_id, &data.header.map_name, &team1, &team2);
    tracing::debug!("Loaded {} as {:?}", display_name(path), match_id);

    let matches_row = MatchRow {
        match_id: match_id.clone(),
        tournament_id,
        date,
        team1,
        team2,
        map_name: data.header.map_name.clone(),
    };

    Ok(ParsedMatch {
        match_id,
        matches_row,
        data,
    })
}

/// Distinct clan names in the order the tick samples first mention them.
pub fn discover_teams(ticks: &[common::TickRow]) -> Vec<String> {
    let mut teams: Vec<String> = Vec::new();

    for sample in ticks.iter() {
        let Some(name) = sample.team_clan_name.as_deref() else {
            continue;
        };
        if name.is_empty() {
            continue;
        }

        if !teams.iter().any(|known| known.as_str() == name) {
            teams.push(name.to_owned());
        }
        if teams.len() == 2 {
            break;
        }
    }

    teams
}

fn create_match_id(tournament_id: &str, map_name: &str, team1: &str, team2: &str) -> String {
    let mut rng = rand::thread_rng();
    let pin: String = (0..4).map(|_| char::from(b'0' + rng.gen_range(0..10u8))).collect();

    format!("{}-{}-{}-vs-{}-{}", tournament_id, map_name, team1, team2, pin)
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
