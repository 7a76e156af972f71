//! QWERTY physical-neighbor table for the nearby-key typo kind.
//!
//! Adapted from the adjacency table used by a comparable human-typing
//! simulator elsewhere in this ecosystem.

/// Physical QWERTY neighbors of `c`, preserving `c`'s case. Empty for
/// characters with no modeled neighbor (digits, punctuation, whitespace).
#[must_use]
pub fn nearby_keys(c: char) -> Vec<char> {
    let lower = c.to_ascii_lowercase();

    let nearby: &[char] = match lower {
        'q' => &['w', 'a', 's'],
        'w' => &['q', 'e', 'a', 's', 'd'],
        'e' => &['w', 'r', 's', 'd', 'f'],
        'r' => &['e', 't', 'd', 'f', 'g'],
        't' => &['r', 'y', 'f', 'g', 'h'],
        'y' => &['t', 'u', 'g', 'h', 'j'],
        'u' => &['y', 'i', 'h', 'j', 'k'],
        'i' => &['u', 'o', 'j', 'k', 'l'],
        'o' => &['i', 'p', 'k', 'l'],
        'p' => &['o', 'l'],
        'a' => &['q', 'w', 's', 'z'],
        's' => &['q', 'w', 'e', 'a', 'd', 'z', 'x'],
        'd' => &['w', 'e', 'r', 's', 'f', 'x', 'c'],
        'f' => &['e', 'r', 't', 'd', 'g', 'c', 'v'],
        'g' => &['r', 't', 'y', 'f', 'h', 'v', 'b'],
        'h' => &['t', 'y', 'u', 'g', 'j', 'b', 'n'],
        'j' => &['y', 'u', 'i', 'h', 'k', 'n', 'm'],
        'k' => &['u', 'i', 'o', 'j', 'l', 'm'],
        'l' => &['i', 'o', 'p', 'k'],
        'z' => &['a', 's', 'x'],
        'x' => &['s', 'd', 'z', 'c'],
        'c' => &['d', 'f', 'x', 'v'],
        'v' => &['f', 'g', 'c', 'b'],
        'b' => &['g', 'h', 'v', 'n'],
        'n' => &['h', 'j', 'b', 'm'],
        'm' => &['j', 'k', 'n'],
        _ => &[],
    };

    if c.is_uppercase() {
        nearby.iter().map(|c| c.to_ascii_uppercase()).collect()
    } else {
        nearby.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearby_lowercase() {
        let neighbors = nearby_keys('f');
        assert!(neighbors.contains(&'d'));
        assert!(neighbors.contains(&'g'));
        assert!(!neighbors.contains(&'z'));
    }

    #[test]
    fn nearby_preserves_case() {
        let neighbors = nearby_keys('F');
        assert!(neighbors.contains(&'D'));
        assert!(neighbors.contains(&'G'));
    }

    #[test]
    fn digits_have_no_neighbors() {
        assert!(nearby_keys('5').is_empty());
    }
}
