//! 千日手の判定

/// 現局面と同じ局面がこれまでに何回現れたか（現局面を含む）
///
/// `history[i]` は `i` 手目を指す前の局面のハッシュ。同じ手番で、かつ少なくとも
/// 4手前の局面だけを比べる。
pub fn count_occurrences(current: u64, history: &[u64]) -> usize {
    let n = history.len();
    if n < 4 {
        return 1;
    }
    1 + (0..=n - 4).rev().step_by(2).filter(|&i| history[i] == current).count()
}

/// 出現回数が `max_acceptable` を超えたか
pub fn is_repetition(current: u64, history: &[u64], max_acceptable: usize) -> bool {
    count_occurrences(current, history) > max_acceptable
}
