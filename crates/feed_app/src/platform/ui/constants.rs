/// Tiles per grid row.
pub const DEFAULT_COLUMNS: usize = 3;
pub const MAX_COLUMNS: usize = 12;
/// Characters per tile, borders excluded.
pub const DEFAULT_TILE_WIDTH: usize = 28;
pub const MIN_TILE_WIDTH: usize = 8;

pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
pub const ELLIPSIS: &str = "...";

pub const TITLE: &str = "Photo feed";
pub const COMMAND_HINT: &str = "[enter]/n next photo   r reset   h help   q quit";
pub const HELP_TEXT: &[&str] = &[
    "Commands:",
    "  <enter>, n, next   fetch the feed and add one new photo",
    "  r, reset           clear the grid and start a new session",
    "  h, help, ?         show this help",
    "  q, quit, exit      leave",
];
