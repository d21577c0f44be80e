/// 32-bit FNV-1a over a byte slice. Used to fingerprint pilot
/// configurations in manifests and reports so renamed or retuned presets
/// are distinguishable after the fact.
pub fn fnv1a(bytes: &[u8]) -> u32 {
    let mut hash = 0x811C_9DC5u32;
    for &byte in bytes {
        hash ^= byte as u32;
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_the_offset_basis() {
        assert_eq!(fnv1a(&[]), 0x811C_9DC5);
    }

    #[test]
    fn known_vector_a() {
        assert_eq!(fnv1a(b"a"), 0xE40C_292C);
    }

    #[test]
    fn nearby_inputs_do_not_collide() {
        assert_ne!(fnv1a(b"motion-wide"), fnv1a(b"motion-fine"));
        assert_ne!(fnv1a(b"{}"), fnv1a(b"{ }"));
    }
}
