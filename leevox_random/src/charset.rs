// Character sets for string draws.

/// ASCII printable characters, `' '` (0x20) through `'~'` (0x7E).
pub const ASCII_PRINTABLE: [char; 95] = ascii_printable();

const fn ascii_printable() -> [char; 95] {
    let mut out = [' '; 95];
    let mut i = 0;
    while i < out.len() {
        out[i] = (b' ' + i as u8) as char;
        i += 1;
    }
    out
}
