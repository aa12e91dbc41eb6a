// Module exports for pure logic
pub mod collation;   // Filename collation keys
pub mod session;     // In-memory host + JSON persistence
pub mod tabs;        // Tab ordering engine
