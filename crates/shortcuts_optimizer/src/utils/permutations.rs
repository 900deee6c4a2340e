/// Permutations of `0..n` in lexicographic order, starting with the identity.
/// Yields a single empty permutation for `n == 0`.
pub struct Permutations {
    next: Option<Vec<usize>>,
}

pub fn permutations(n: usize) -> Permutations {
    Permutations {
        next: Some((0..n).collect()),
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;

        let mut following = current.clone();
        if advance(&mut following) {
            self.next = Some(following);
        }

        Some(current)
    }
}

/// Rearranges `values` into the next lexicographic permutation. Returns false
/// when `values` is already the last one.
fn advance(values: &mut [usize]) -> bool {
    if values.len() < 2 {
        return false;
    }

    let Some(pivot) = (0..values.len() - 1).rev().find(|&i| values[i] < values[i + 1]) else {
        return false;
    };

    let pivot_value = values[pivot];
    let successor = values
        .iter()
        .rposition(|&value| value > pivot_value)
        .unwrap_or(pivot + 1);

    values.swap(pivot, successor);
    values[pivot + 1..].reverse();

    true
}
