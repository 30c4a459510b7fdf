// Draft-board state: comparison slots, drafted roster, and the session that
// owns them.

pub mod roster;
pub mod selection;
pub mod session;
