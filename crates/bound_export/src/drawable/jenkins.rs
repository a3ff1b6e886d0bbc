//! Jenkins one-at-a-time name hash

/// Hash a name the way the game engine does: lowercased, one byte at a time
pub fn joaat(text: &str) -> u32 {
    let mut hash: u32 = 0;
    for byte in text.bytes().map(|b| b.to_ascii_lowercase()) {
        hash = hash.wrapping_add(u32::from(byte));
        hash = hash.wrapping_add(hash << 10);
        hash ^= hash >> 6;
    }
    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash.wrapping_add(hash << 15)
}
