/// The wildcard token inside a dot-path pattern.
pub const WILDCARD: char = '*';

/// Expand every wildcard in `pattern` into the indices `0..size`.
///
/// Only the first wildcard is substituted per step; patterns that still
/// contain a wildcard are expanded recursively with the same size, so the
/// leftmost wildcard varies slowest. A pattern with `k` wildcards yields
/// `size^k` paths; a pattern without wildcards yields itself.
pub fn expand_wildcards(pattern: &str, size: usize) -> Vec<String> {
	if !pattern.contains(WILDCARD) {
		return vec![pattern.to_string()];
	}

	let mut keys = Vec::with_capacity(expansion_len(pattern, size).min(4096));
	for i in 0..size {
		let substituted = pattern.replacen(WILDCARD, &i.to_string(), 1);
		if substituted.contains(WILDCARD) {
			keys.extend(expand_wildcards(&substituted, size));
		} else {
			keys.push(substituted);
		}
	}

	keys
}

/// Number of wildcard positions in a pattern.
pub fn wildcard_count(pattern: &str) -> usize {
	pattern.matches(WILDCARD).count()
}

/// How many paths [`expand_wildcards`] would produce, saturating on overflow.
pub fn expansion_len(pattern: &str, size: usize) -> usize {
	match wildcard_count(pattern) {
		0 => 1,
		k => size.saturating_pow(u32::try_from(k).unwrap_or(u32::MAX)),
	}
}
