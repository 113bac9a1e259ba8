// Map layout
pub const AREA_COUNT: u32 = 8;
pub const STEPS_PER_AREA: u32 = 8;
pub const UPCOMING_EVENT_WINDOW: usize = 3;

// Player start
pub const INITIAL_LEVEL: u32 = 1;
pub const INITIAL_HP: u64 = 50;
pub const INITIAL_ATK: u64 = 10;
pub const STARTER_WEAPON_NAME: &str = "Basic Stick";

// EXP curve: 10 * level^2, plus 2^(level - threshold) past the threshold
pub const EXP_CURVE_COEFFICIENT: u64 = 10;
pub const EXP_CURVE_EXPONENTIAL_THRESHOLD: u32 = 10;

// Level-up growth bands: (max level in band, hp gain, atk gain)
pub const LEVEL_GROWTH_BANDS: [(u32, u64, u64); 6] = [
    (10, 8, 3),
    (25, 20, 8),
    (50, 60, 25),
    (100, 200, 80),
    (200, 1_000, 400),
    (u32::MAX, 5_000, 2_000),
];

// Healing
pub const INITIAL_HEAL_COUNT: u32 = 3;
pub const BOSS_CLEAR_HEAL_BONUS: u32 = 1;
pub const PREP_HEAL_PERCENT: u32 = 70;
pub const TREASURE_HEAL_PERCENT: u32 = 70;
pub const HEAL_ITEM_PERCENT: u32 = 40;

// Enemy base stats before area scaling
pub const ENEMY_BASE_HP: u64 = 30;
pub const ENEMY_BASE_ATK: u64 = 5;
pub const ENEMY_BASE_EXP: u64 = 8;
pub const ENEMY_BASE_GOLD: u64 = 3;
pub const FALLBACK_MONSTER_NAME: &str = "Wild Monster";

// Abnormal (rare spawn) enemies
pub const ABNORMAL_TIERS: [u32; 4] = [8, 20, 60, 150];
pub const ABNORMAL_TIER_WEIGHTS: [u32; 4] = [25, 30, 25, 20];
pub const ABNORMAL_EXP_MULTIPLIER: u32 = 100;

// Battle
pub const GUARD_DAMAGE_DIVISOR: u32 = 10;
pub const GUARD_COUNTER_DIVISOR: u32 = 10;

// Weapon drops: bonus = base * reward multiplier * U[min, max]
pub const WEAPON_DROP_BASE_BONUS: u64 = 5;
pub const WEAPON_DROP_ROLL_MIN: f64 = 0.8;
pub const WEAPON_DROP_ROLL_MAX: f64 = 1.2;
pub const FALLBACK_WEAPON_NAME: &str = "Rusty Blade";

// Shop base prices, multiplied by the area reward multiplier
pub const ELEMENT_CHANGE_BASE_PRICE: u64 = 15;
pub const PERFECT_GUARD_BASE_PRICE: u64 = 25;
pub const HEAL_ITEM_BASE_PRICE: u64 = 10;

// Tolerance for probability tables summing to 1.0
pub const PROBABILITY_EPSILON: f64 = 1e-6;
