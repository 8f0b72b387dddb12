pub struct Icons;

impl Icons {
    pub const ROCKET: &str = "🚀";
    pub const GLOBE: &str = "🌍";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const BUILDING: &str = "🏢";
    pub const PIN: &str = "📍";
    pub const EMPTY: &str = "∅";
}
