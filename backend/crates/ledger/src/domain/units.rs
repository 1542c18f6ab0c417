//! SUI / MIST conversion

/// 1 SUI = 10^9 MIST
pub const MIST_PER_SUI: u64 = 1_000_000_000;

/// Render MIST as SUI with four decimals, rounding half up
pub fn format_sui(mist: u64) -> String {
    // 10^5 MIST per displayed unit of the fourth decimal
    let units = (u128::from(mist) + 50_000) / 100_000;
    format!("{}.{:04}", units / 10_000, units % 10_000)
}

/// Parse a MIST amount as returned by the node (decimal string)
pub fn parse_mist(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok()
}
