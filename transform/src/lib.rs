pub mod entrykill;
pub mod gamestate;
pub mod grenades;
pub mod rounds;
pub mod shots;
