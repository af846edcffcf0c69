//! Linux key code to text table for a US keyboard layout.
//!
//! Indices follow `linux/input-event-codes.h`.  Printable keys map to their
//! unshifted character; keypad keys map to the character printed on them;
//! named keys that an RFID reader might emit by mistake map to a bracketed
//! name such as `"<f1>"` so they stay visible in the identifier.  Modifier
//! keys and everything without a sensible rendering map to `""` and therefore
//! contribute nothing.
//!
//! `KEY_ENTER` maps to `"\n"`: it is the line terminator on the wire.  The
//! translator recognises it before consulting the table, so the newline is
//! written by the protocol encoder rather than appended to the identifier.

/// Number of entries in a scan-code table.
pub const SCAN_CODE_TABLE_SIZE: usize = 256;

/// Key code of the terminator key (`KEY_ENTER`).
pub const KEY_ENTER: u16 = 28;

/// The US-layout table.
pub static US_LAYOUT: [&str; SCAN_CODE_TABLE_SIZE] = build_us_layout();

const fn build_us_layout() -> [&'static str; SCAN_CODE_TABLE_SIZE] {
    let mut t = [""; SCAN_CODE_TABLE_SIZE];

    t[1] = "<esc>";

    // Number row
    t[2] = "1";
    t[3] = "2";
    t[4] = "3";
    t[5] = "4";
    t[6] = "5";
    t[7] = "6";
    t[8] = "7";
    t[9] = "8";
    t[10] = "9";
    t[11] = "0";
    t[12] = "-";
    t[13] = "=";
    t[14] = "<backspace>";
    t[15] = "<tab>";

    // Top letter row
    t[16] = "q";
    t[17] = "w";
    t[18] = "e";
    t[19] = "r";
    t[20] = "t";
    t[21] = "y";
    t[22] = "u";
    t[23] = "i";
    t[24] = "o";
    t[25] = "p";
    t[26] = "[";
    t[27] = "]";
    t[KEY_ENTER as usize] = "\n";

    // Home row
    t[30] = "a";
    t[31] = "s";
    t[32] = "d";
    t[33] = "f";
    t[34] = "g";
    t[35] = "h";
    t[36] = "j";
    t[37] = "k";
    t[38] = "l";
    t[39] = ";";
    t[40] = "'";
    t[41] = "`";
    t[43] = "\\";

    // Bottom row
    t[44] = "z";
    t[45] = "x";
    t[46] = "c";
    t[47] = "v";
    t[48] = "b";
    t[49] = "n";
    t[50] = "m";
    t[51] = ",";
    t[52] = ".";
    t[53] = "/";
    t[55] = "*";
    t[57] = " ";

    // Function keys
    t[59] = "<f1>";
    t[60] = "<f2>";
    t[61] = "<f3>";
    t[62] = "<f4>";
    t[63] = "<f5>";
    t[64] = "<f6>";
    t[65] = "<f7>";
    t[66] = "<f8>";
    t[67] = "<f9>";
    t[68] = "<f10>";
    t[87] = "<f11>";
    t[88] = "<f12>";

    // Keypad
    t[71] = "7";
    t[72] = "8";
    t[73] = "9";
    t[74] = "-";
    t[75] = "4";
    t[76] = "5";
    t[77] = "6";
    t[78] = "+";
    t[79] = "1";
    t[80] = "2";
    t[81] = "3";
    t[82] = "0";
    t[83] = ".";
    t[96] = "<kpenter>";
    t[98] = "/";
    t[117] = "=";

    // Navigation cluster
    t[102] = "<home>";
    t[103] = "<up>";
    t[104] = "<pageup>";
    t[105] = "<left>";
    t[106] = "<right>";
    t[107] = "<end>";
    t[108] = "<down>";
    t[109] = "<pagedown>";
    t[110] = "<insert>";
    t[111] = "<delete>";

    t
}
