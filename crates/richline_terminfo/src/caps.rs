//! Canonical capability orderings.
//!
//! The compiled terminfo format (see [`crate::loader`]) stores booleans,
//! numbers and strings as flat, position-addressed arrays: the *i*-th byte
//! of the boolean section, the *i*-th 16-bit integer of the numbers section
//! and the *i*-th string-table offset all refer to the *i*-th entry of a
//! fixed, well-known capability ordering. These tables are that ordering,
//! in the relative order ncurses' own `Caps` file uses them.
//!
//! Only the capabilities this crate's callers (the decoder, the line editor
//! and the virtual cursor) actually bind to by name need to be present, plus
//! enough of the common screen/formatting set to make the database useful on
//! its own. Binary terminfo files describing a capability beyond the end of
//! these tables are still read correctly: surplus boolean bytes, numbers or
//! string offsets are kept as [`crate::capability::CapabilityKind::Unknown`]
//! entries rather than rejected.

/// A single entry of a canonical capability table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapDef {
    /// Long mnemonic, e.g. `key_up`.
    pub variable: &'static str,
    /// Short form, e.g. `kcuu1`.
    pub capname: &'static str,
    /// Two-letter legacy termcap code, e.g. `ku`.
    pub tcap_code: &'static str,
    /// Human-readable description.
    pub description: &'static str,
}

macro_rules! cap {
    ($variable:literal, $capname:literal, $tcap:literal, $desc:literal) => {
        CapDef {
            variable: $variable,
            capname: $capname,
            tcap_code: $tcap,
            description: $desc,
        }
    };
}

/// Canonical boolean capability order.
pub const BOOLEAN_CAPS: &[CapDef] = &[
    cap!("auto_left_margin", "bw", "bw", "cub1 wraps from column 0 to last column"),
    cap!("auto_right_margin", "am", "am", "terminal has automatic margins"),
    cap!("no_esc_ctlc", "xsb", "xb", "beehive (f1=escape, f2=ctrl C)"),
    cap!("ceol_standout_glitch", "xhp", "xs", "standout not erased by overwriting (hp)"),
    cap!("eat_newline_glitch", "xenl", "xn", "newline ignored after 80 columns"),
    cap!("erase_overstrike", "eo", "eo", "can erase overstrikes with a blank"),
    cap!("generic_type", "gn", "gn", "generic line type"),
    cap!("hard_copy", "hc", "hc", "hardcopy terminal"),
    cap!("has_meta_key", "km", "km", "has a meta key"),
    cap!("has_status_line", "hs", "hs", "has extra status line"),
    cap!("insert_null_glitch", "in", "in", "insert mode distinguishes nulls"),
    cap!("memory_above", "da", "da", "display may be retained above the screen"),
    cap!("memory_below", "db", "db", "display may be retained below the screen"),
    cap!("move_insert_mode", "mir", "mi", "safe to move while in insert mode"),
    cap!("move_standout_mode", "msgr", "ms", "safe to move while in standout mode"),
    cap!("over_strike", "os", "os", "terminal can overstrike"),
    cap!("status_line_esc_ok", "eslok", "es", "escape can be used on the status line"),
    cap!("dest_tabs_magic_smso", "xt", "xt", "tabs destructive, magic smso char (t1061)"),
    cap!("tilde_glitch", "hz", "hz", "cannot print ~"),
    cap!("transparent_underline", "ul", "ul", "underline character overstrikes"),
    cap!("xon_xoff", "xon", "xo", "terminal uses xon/xoff handshaking"),
    cap!("needs_xon_xoff", "nxon", "nx", "padding will not work, xon/xoff required"),
    cap!("prtr_silent", "mc5i", "5i", "printer will not echo on screen"),
    cap!("hard_cursor", "chts", "HC", "cursor is hard to see"),
    cap!("non_rev_rmcup", "nrrmc", "NR", "smcup does not reverse rmcup"),
    cap!("no_pad_char", "npc", "NP", "pad character does not exist"),
    cap!("non_dest_scroll_region", "ndscr", "ND", "scrolling region is non-destructive"),
    cap!("can_change", "ccc", "cc", "terminal can re-define existing colors"),
    cap!("back_color_erase", "bce", "ut", "screen erased with background color"),
    cap!("hue_lightness_saturation", "hls", "hl", "terminal uses HLS color notation"),
    cap!("col_addr_glitch", "xhpa", "YA", "only positive motion for hpa/mhpa caps"),
    cap!("cr_cancels_micro_mode", "crxm", "YB", "using cr turns off micro mode"),
    cap!("has_print_wheel", "daisy", "YC", "printer needs operator to change character set"),
    cap!("row_addr_glitch", "xvpa", "YD", "only positive motion for vpa/mvpa caps"),
    cap!("semi_auto_right_margin", "sam", "YE", "printing in last column causes cr"),
    cap!("cpi_changes_res", "cpix", "YF", "changing character pitch changes resolution"),
    cap!("lpi_changes_res", "lpix", "YG", "changing line pitch changes resolution"),
    cap!("backspaces_with_bs", "bs", "bs", "terminal can backspace with ^H"),
];

/// Canonical numeric capability order.
pub const NUMBER_CAPS: &[CapDef] = &[
    cap!("columns", "cols", "co", "number of columns in a line"),
    cap!("init_tabs", "it", "it", "tabs initially every # spaces"),
    cap!("lines", "lines", "li", "number of lines on screen or page"),
    cap!("lines_of_memory", "lm", "lm", "lines of memory if > lines; 0 means varies"),
    cap!("magic_cookie_glitch", "xmc", "sg", "number of blank characters left by smso/rmso"),
    cap!("padding_baud_rate", "pb", "pb", "lowest baud rate where padding is needed"),
    cap!("virtual_terminal", "vt", "vt", "virtual terminal number"),
    cap!("width_status_line", "wsl", "ws", "number of columns in status line"),
    cap!("num_labels", "nlab", "Nl", "number of labels on screen"),
    cap!("label_height", "lh", "lh", "rows in each label"),
    cap!("label_width", "lw", "lw", "columns in each label"),
    cap!("max_attributes", "ma", "ma", "maximum combined attributes terminal can handle"),
    cap!("maximum_windows", "wnum", "MW", "maximum number of definable windows"),
    cap!("max_colors", "colors", "Co", "maximum number of colors on screen"),
    cap!("max_pairs", "pairs", "pa", "maximum number of color-pairs on the screen"),
    cap!("no_color_video", "ncv", "NC", "video attributes that cannot be used with colors"),
    cap!("buffer_capacity", "bufsz", "Ya", "numbers of bytes buffered before printing"),
    cap!("dot_vert_spacing", "spinv", "Yb", "spacing of pins vertically in pins per inch"),
    cap!("dot_horz_spacing", "spinh", "Yc", "spacing of dots horizontally in dots per inch"),
    cap!("padding_char", "npc_pad", "Yd", "padding char (instead of null)"),
    cap!("label_format", "lf", "Yf", "label format"),
    cap!("micro_col_size", "wnum_", "Yi", "character step size in micro mode"),
];

/// Canonical string capability order.
pub const STRING_CAPS: &[CapDef] = &[
    cap!("back_tab", "cbt", "bt", "back tab"),
    cap!("bell", "bel", "bl", "audible signal (bell)"),
    cap!("carriage_return", "cr", "cr", "carriage return"),
    cap!("change_scroll_region", "csr", "cs", "change region to line #1 to line #2"),
    cap!("clear_all_tabs", "tbc", "ct", "clear all tab stops"),
    cap!("clear_screen", "clear", "cl", "clear screen and home cursor"),
    cap!("clr_eol", "el", "ce", "clear to end of line"),
    cap!("clr_eos", "ed", "cd", "clear to end of screen"),
    cap!("column_address", "hpa", "ch", "horizontal position absolute"),
    cap!("command_character", "cmdch", "CC", "terminal settable cmd character"),
    cap!("cursor_address", "cup", "cm", "move to row #1 column #2"),
    cap!("cursor_down", "cud1", "do", "move cursor down one line"),
    cap!("cursor_home", "home", "ho", "move cursor to home position"),
    cap!("cursor_invisible", "civis", "vi", "make cursor invisible"),
    cap!("cursor_left", "cub1", "le", "move cursor left one space"),
    cap!("cursor_mem_address", "mrcup", "CM", "memory relative cursor addressing"),
    cap!("cursor_normal", "cnorm", "ve", "make cursor appear normal"),
    cap!("cursor_right", "cuf1", "nd", "move cursor right one space"),
    cap!("cursor_to_ll", "ll", "ll", "move cursor to lower left corner"),
    cap!("cursor_up", "cuu1", "up", "move cursor up one line"),
    cap!("cursor_visible", "cvvis", "vs", "make cursor very visible"),
    cap!("delete_character", "dch1", "dc", "delete character"),
    cap!("delete_line", "dl1", "dl", "delete line"),
    cap!("dis_status_line", "dsl", "ds", "disable status line"),
    cap!("down_half_line", "hd", "hd", "half a line down"),
    cap!("enter_alt_charset_mode", "smacs", "as", "start alternate character set"),
    cap!("enter_blink_mode", "blink", "mb", "turn on blinking"),
    cap!("enter_bold_mode", "bold", "md", "turn on bold (extra bright) mode"),
    cap!("enter_ca_mode", "smcup", "ti", "string to start programs using cup"),
    cap!("enter_delete_mode", "smdc", "dm", "enter delete mode"),
    cap!("enter_dim_mode", "dim", "mh", "turn on half-bright mode"),
    cap!("enter_insert_mode", "smir", "im", "enter insert mode"),
    cap!("enter_reverse_mode", "rev", "mr", "turn on reverse video mode"),
    cap!("enter_secure_mode", "invis", "mk", "turn on blank mode (invisible)"),
    cap!("enter_standout_mode", "smso", "so", "begin standout mode"),
    cap!("enter_underline_mode", "smul", "us", "begin underline mode"),
    cap!("erase_chars", "ech", "ec", "erase #1 characters"),
    cap!("exit_alt_charset_mode", "rmacs", "ae", "end alternate character set"),
    cap!("exit_attribute_mode", "sgr0", "me", "turn off all attributes"),
    cap!("exit_ca_mode", "rmcup", "te", "strings to end programs using cup"),
    cap!("exit_delete_mode", "rmdc", "ed", "end delete mode"),
    cap!("exit_insert_mode", "rmir", "ei", "exit insert mode"),
    cap!("exit_standout_mode", "rmso", "se", "exit standout mode"),
    cap!("exit_underline_mode", "rmul", "ue", "exit underline mode"),
    cap!("flash_screen", "flash", "vb", "visible bell (may not move cursor)"),
    cap!("form_feed", "ff", "ff", "hardcopy terminal page eject"),
    cap!("from_status_line", "fsl", "fs", "return from status line"),
    cap!("init_1string", "is1", "i1", "initialization string"),
    cap!("init_2string", "is2", "is", "initialization string"),
    cap!("init_3string", "is3", "i3", "initialization string"),
    cap!("init_file", "if", "if", "name of initialization file"),
    cap!("insert_character", "ich1", "ic", "insert character"),
    cap!("insert_line", "il1", "al", "insert line"),
    cap!("insert_padding", "ip", "ip", "insert padding after inserted character"),
    cap!("key_backspace", "kbs", "kb", "backspace key"),
    cap!("key_catab", "ktbc", "ka", "clear all tabs key"),
    cap!("key_clear", "kclr", "kC", "clear screen or erase key"),
    cap!("key_ctab", "kctab", "kt", "clear tab stop key"),
    cap!("key_dc", "kdch1", "kD", "delete character key"),
    cap!("key_dl", "kdl1", "kL", "delete line key"),
    cap!("key_down", "kcud1", "kd", "down arrow key"),
    cap!("key_eic", "krmir", "kM", "sent by rmir or smir in insert mode"),
    cap!("key_eol", "kel", "kE", "clear to end of line key"),
    cap!("key_eos", "ked", "kS", "clear to end of screen key"),
    cap!("key_f0", "kf0", "k0", "F0 function key"),
    cap!("key_f1", "kf1", "k1", "F1 function key"),
    cap!("key_f2", "kf2", "k2", "F2 function key"),
    cap!("key_f3", "kf3", "k3", "F3 function key"),
    cap!("key_f4", "kf4", "k4", "F4 function key"),
    cap!("key_f5", "kf5", "k5", "F5 function key"),
    cap!("key_f6", "kf6", "k6", "F6 function key"),
    cap!("key_f7", "kf7", "k7", "F7 function key"),
    cap!("key_f8", "kf8", "k8", "F8 function key"),
    cap!("key_f9", "kf9", "k9", "F9 function key"),
    cap!("key_f10", "kf10", "k;", "F10 function key"),
    cap!("key_f11", "kf11", "F1", "F11 function key"),
    cap!("key_f12", "kf12", "F2", "F12 function key"),
    cap!("key_home", "khome", "kh", "home key"),
    cap!("key_ic", "kich1", "kI", "insert character key"),
    cap!("key_il", "kil1", "kA", "insert line key"),
    cap!("key_left", "kcub1", "kl", "left arrow key"),
    cap!("key_ll", "kll", "kH", "lower-left key (home down)"),
    cap!("key_npage", "knp", "kN", "next page key"),
    cap!("key_ppage", "kpp", "kP", "previous page key"),
    cap!("key_right", "kcuf1", "kr", "right arrow key"),
    cap!("key_sf", "kind", "kF", "scroll forward key"),
    cap!("key_sr", "kri", "kR", "scroll backward key"),
    cap!("key_stab", "khts", "kT", "set tab key"),
    cap!("key_up", "kcuu1", "ku", "up arrow key"),
    cap!("key_end", "kend", "@7", "end key"),
    cap!("key_enter", "kent", "@8", "enter/send key"),
    cap!("key_find", "kfnd", "@0", "find key"),
    cap!("key_select", "kslt", "*6", "select key"),
    cap!("keypad_local", "rmkx", "ke", "leave keyboard transmit mode"),
    cap!("keypad_xmit", "smkx", "ks", "enter keyboard transmit mode"),
    cap!("lab_f0", "lf0", "l0", "label on function key f0 if not f0"),
    cap!("lab_f1", "lf1", "l1", "label on function key f1 if not f1"),
    cap!("meta_off", "rmm", "mo", "turn off meta mode"),
    cap!("meta_on", "smm", "mm", "turn on meta mode (8th-bit on)"),
    cap!("newline", "nel", "nw", "newline (behaves like cr followed by lf)"),
    cap!("pad_char", "pad", "pc", "padding char (instead of null)"),
    cap!("parm_dch", "dch", "DC", "delete #1 characters"),
    cap!("parm_delete_line", "dl", "DL", "delete #1 lines"),
    cap!("parm_down_cursor", "cud", "DO", "move cursor down #1 lines"),
    cap!("parm_ich", "ich", "IC", "insert #1 characters"),
    cap!("parm_index", "indn", "SF", "scroll forward #1 lines"),
    cap!("parm_insert_line", "il", "AL", "insert #1 lines"),
    cap!("parm_left_cursor", "cub", "LE", "move cursor left #1 spaces"),
    cap!("parm_right_cursor", "cuf", "RI", "move cursor right #1 spaces"),
    cap!("parm_rindex", "rin", "SR", "scroll back #1 lines"),
    cap!("parm_up_cursor", "cuu", "UP", "move cursor up #1 lines"),
    cap!("pkey_key", "pfkey", "pk", "program function key #1 to type string #2"),
    cap!("print_screen", "mc0", "ps", "print contents of screen"),
    cap!("prtr_off", "mc4", "pf", "turn off printer"),
    cap!("prtr_on", "mc5", "po", "turn on printer"),
    cap!("repeat_char", "rep", "rp", "repeat char #1 #2 times"),
    cap!("reset_1string", "rs1", "r1", "reset string"),
    cap!("reset_2string", "rs2", "r2", "reset string"),
    cap!("reset_3string", "rs3", "r3", "reset string"),
    cap!("reset_file", "rf", "rf", "name of reset file"),
    cap!("restore_cursor", "rc", "rc", "restore cursor to position of last save_cursor"),
    cap!("row_address", "vpa", "cv", "vertical position absolute"),
    cap!("save_cursor", "sc", "sc", "save current cursor position"),
    cap!("scroll_forward", "ind", "sf", "scroll text up"),
    cap!("scroll_reverse", "ri", "sr", "scroll text down"),
    cap!("set_attributes", "sgr", "sa", "define video attributes"),
    cap!("set_tab", "hts", "st", "set a tab in every row, current columns"),
    cap!("set_window", "wind", "wi", "current window is lines #1-#2 cols #3-#4"),
    cap!("tab", "ht", "ta", "tab to next 8-space hardware tab stop"),
    cap!("to_status_line", "tsl", "ts", "move to status line, column #1"),
    cap!("underline_char", "uc", "uc", "underline char and move past it"),
    cap!("up_half_line", "hu", "hu", "half a line up"),
    cap!("init_prog", "iprog", "iP", "path name of program for initialization"),
    cap!("key_a1", "ka1", "K1", "upper left of keypad"),
    cap!("key_a3", "ka3", "K3", "upper right of keypad"),
    cap!("key_b2", "kb2", "K2", "center of keypad"),
    cap!("key_c1", "kc1", "K4", "lower left of keypad"),
    cap!("key_c3", "kc3", "K5", "lower right of keypad"),
    cap!("set_color_pair", "scp", "sp", "set current color pair to #1"),
    cap!("orig_pair", "op", "op", "set default pair to original value"),
    cap!("set_a_foreground", "setaf", "AF", "set foreground color to #1, using ANSI escape"),
    cap!("set_a_background", "setab", "AB", "set background color to #1, using ANSI escape"),
    cap!("enter_am_mode", "smam", "SA", "turn on automatic margins"),
    cap!("exit_am_mode", "rmam", "RA", "turn off automatic margins"),
    cap!("acs_chars", "acsc", "ac", "graphics charset pairs"),
    cap!("key_mouse", "kmous", "Km", "mouse event has occurred"),
    cap!("user0", "u0", "u0", "user string #0"),
];
