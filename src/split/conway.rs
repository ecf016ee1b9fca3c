//! Conway's Splitting Theorem
//!
//! A string `LR` splits as `L.R` when the evolution of `L` and of `R` never
//! interact again. Only the last character of `L` matters, together with a
//! few characters at the start of `R`. Here `n` is any character other than
//! `1`, `2`, `3` and `X` is any character.
//!
//! | left ends | right starts                                      |
//! |-----------|---------------------------------------------------|
//! | `n]`      | `[1`, `[2`, `[3`                                  |
//! | `2]`      | `[1^1 X^1`, `[1^3`, `[3^1 X^(not 3)`, `[n^1`      |
//! | `≠2]`     | `[2^2 1^1 X^1`, `[2^2 1^3`, `[2^2 3^1 X^(not 3)`, `[2^2 n^(0 or 1)` |

fn is_run_digit(ch: char) -> bool {
    matches!(ch, '1' | '2' | '3')
}

/// Boundary predicate of Conway's Splitting Theorem
pub fn is_split_pair_conway(left: &str, right: &str) -> bool {
    let Some(last) = left.chars().next_back() else {
        return true;
    };
    // no rule looks further than six characters past the boundary
    let head: Vec<char> = right.chars().take(7).collect();
    let Some(&first) = head.first() else {
        return true;
    };

    if !is_run_digit(last) && is_run_digit(first) {
        return true;
    }
    if last == '2' {
        return splits_after_two(&head);
    }
    match head.as_slice() {
        ['2', '2', tail @ ..] => tail.is_empty() || splits_after_two(tail),
        _ => false,
    }
}

/// The right-hand patterns that split from a preceding `2`
fn splits_after_two(right: &[char]) -> bool {
    match right {
        // [1^1 X^1
        ['1', x, rest @ ..] if *x != '1' && rest.first() != Some(x) => true,
        // [1^3
        ['1', '1', '1', rest @ ..] => rest.first() != Some(&'1'),
        // [3^1 X^(not 3)
        ['3'] => true,
        ['3', x, rest @ ..] => *x != '3' && !rest.starts_with(&[*x, *x]),
        // [n^1
        [n, rest @ ..] => !is_run_digit(*n) && rest.first() != Some(n),
        [] => false,
    }
}
