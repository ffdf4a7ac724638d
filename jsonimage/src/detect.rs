/// Cheap check run before the JSON parse: does the buffer start like a JSON
/// object or array? Says nothing about validity.
#[inline]
pub fn is_candidate(data: &[u8]) -> bool {
    matches!(data.first(), Some(b'{' | b'['))
}
