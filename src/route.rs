use crate::nav::PLAYER_POSITIONS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Players,
    PositionListing { position: String, historical: bool },
    Player { slug: String },
    Teams,
    Team { slug: String },
    Coaches,
    HistoricalCoaches,
    Coach { slug: String },
    Research,
    Tool { name: String },
    Unknown { path: String },
}

fn is_position(segment: &str) -> bool {
    PLAYER_POSITIONS
        .iter()
        .any(|pos| pos.eq_ignore_ascii_case(segment))
}

/// Maps a menu target path to the screen it names.
pub fn resolve(path: &str) -> Route {
    let segments: Vec<&str> = path
        .split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    match segments.as_slice() {
        [] => Route::Home,
        ["players"] => Route::Players,
        ["players", "historical", pos] if is_position(pos) => Route::PositionListing {
            position: pos.to_lowercase(),
            historical: true,
        },
        ["players", pos] if is_position(pos) => Route::PositionListing {
            position: pos.to_lowercase(),
            historical: false,
        },
        ["players", slug] => Route::Player {
            slug: slug.to_string(),
        },
        ["teams"] => Route::Teams,
        ["teams", slug] => Route::Team {
            slug: slug.to_string(),
        },
        ["coaches"] => Route::Coaches,
        ["coaches", "historical"] => Route::HistoricalCoaches,
        ["coaches", slug] => Route::Coach {
            slug: slug.to_string(),
        },
        ["research"] => Route::Research,
        ["tools", name] => Route::Tool {
            name: name.to_string(),
        },
        _ => Route::Unknown {
            path: path.to_string(),
        },
    }
}

/// Heading for routes that render as placeholder pages.
pub fn title(route: &Route) -> String {
    match route {
        Route::Home => "Home".to_string(),
        Route::Players => "Players".to_string(),
        Route::PositionListing {
            position,
            historical,
        } => {
            if *historical {
                format!("Historical {}", position.to_uppercase())
            } else {
                position.to_uppercase()
            }
        }
        Route::Player { slug } => format!("Player {slug}"),
        Route::Teams => "Teams".to_string(),
        Route::Team { slug } => format!("Team {slug}"),
        Route::Coaches => "Coaches".to_string(),
        Route::HistoricalCoaches => "Historical Coaches".to_string(),
        Route::Coach { slug } => format!("Coach {slug}"),
        Route::Research => "Research".to_string(),
        Route::Tool { name } => format!("Tools: {}", name.to_uppercase()),
        Route::Unknown { path } => format!("Not found: {path}"),
    }
}

#[cfg(test)]
mod tests {
    use super::{Route, resolve, title};

    #[test]
    fn positions_win_over_slugs() {
        assert_eq!(
            resolve("/players/QB"),
            Route::PositionListing {
                position: "qb".to_string(),
                historical: false
            }
        );
        assert_eq!(
            resolve("/players/historical/te/"),
            Route::PositionListing {
                position: "te".to_string(),
                historical: true
            }
        );
        assert_eq!(
            resolve("/players/qbert"),
            Route::Player {
                slug: "qbert".to_string()
            }
        );
    }

    #[test]
    fn known_sections_and_fallback() {
        assert_eq!(resolve("/"), Route::Home);
        assert_eq!(resolve(""), Route::Home);
        assert_eq!(resolve("/coaches/historical"), Route::HistoricalCoaches);
        assert_eq!(title(&resolve("/tools/xfp")), "Tools: XFP");
        assert_eq!(
            resolve("/players/historical/k/extra"),
            Route::Unknown {
                path: "/players/historical/k/extra".to_string()
            }
        );
    }
}
