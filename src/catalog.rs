//! # Game Catalog
//!
//! The fixed, process-wide list of games the verification service understands,
//! plus the server regions offered for games that partition accounts by region.

use serde::Serialize;

/// One supported game.
///
/// Entries live in [`GAMES`] for the lifetime of the process and are handed
/// around as `&'static GameDefinition`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameDefinition {
    /// Catalog key sent to the remote service (e.g. `"ml"`)
    pub id: &'static str,
    /// Human-readable name
    pub display_name: &'static str,
    /// Accounts are partitioned by zone; a zone ID must accompany the account ID
    pub requires_zone: bool,
    /// Accounts are partitioned by region; a server must accompany the account ID
    pub requires_server: bool,
}

pub const FREE_FIRE: GameDefinition = GameDefinition {
    id: "freefire",
    display_name: "Free Fire",
    requires_zone: false,
    requires_server: false,
};

pub const MOBILE_LEGENDS: GameDefinition = GameDefinition {
    id: "ml",
    display_name: "Mobile Legends",
    requires_zone: true,
    requires_server: false,
};

pub const CALL_OF_DUTY_MOBILE: GameDefinition = GameDefinition {
    id: "codm",
    display_name: "Call of Duty Mobile",
    requires_zone: false,
    requires_server: false,
};

pub const ARENA_OF_VALOR: GameDefinition = GameDefinition {
    id: "aov",
    display_name: "Arena of Valor",
    requires_zone: false,
    requires_server: false,
};

pub const GENSHIN_IMPACT: GameDefinition = GameDefinition {
    id: "genshin",
    display_name: "Genshin Impact",
    requires_zone: false,
    requires_server: true,
};

/// Every supported game, in display order.
pub static GAMES: [GameDefinition; 5] = [
    FREE_FIRE,
    MOBILE_LEGENDS,
    CALL_OF_DUTY_MOBILE,
    ARENA_OF_VALOR,
    GENSHIN_IMPACT,
];

/// Server regions offered for games with `requires_server`.
pub const SERVERS: [&str; 3] = ["Asia", "America", "Europe"];

/// Region used when the user has not picked one.
pub const DEFAULT_SERVER: &str = "Asia";

/// Looks up a game by its catalog key.
pub fn find_game(id: &str) -> Option<&'static GameDefinition> {
    GAMES.iter().find(|game| game.id == id)
}
