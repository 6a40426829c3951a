use super::entities::Value;

/// Coins every seat starts a game with.
pub const STARTING_COINS: i64 = 100;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 5;

/// Rounds played when nothing else is configured.
pub const DEFAULT_MAX_ROUNDS: u32 = 3;
pub const DEFAULT_PLAYER_COUNT: usize = 3;

/// Highest card number any deck uses (five players).
pub const MAX_NUMBER: Value = 15;

/// Cards per suit used when the player count is outside the supported range.
pub const FALLBACK_MAX_NUMBER: Value = 9;

/// Strength of the two strongest ranks. Every other rank is its own strength.
pub const RANK_TWO_STRENGTH: u32 = 100;
pub const RANK_ONE_STRENGTH: u32 = 99;

/// Weights of the components of a play's strength. The type weight dwarfs
/// any card strength so a higher type always outranks a lower one.
pub const PLAY_TYPE_WEIGHT: u64 = 1_000_000;
pub const CARD_STRENGTH_WEIGHT: u64 = 1_000;

/// Size of the combinations bots search beyond singles, pairs and triples.
pub const FIVE_CARD_PLAY: usize = 5;

/// Default simulated thinking time of a computer seat, in milliseconds.
pub const DEFAULT_THINK_TIME_MIN_MS: u64 = 1_000;
pub const DEFAULT_THINK_TIME_MAX_MS: u64 = 3_000;

/// Maximum length of a display name.
pub const MAX_PLAYER_NAME_LENGTH: usize = 32;
