/// Removes the value at `from` and reinserts it at `to`, so the value ends up
/// occupying index `to`. Does nothing if `from` equals `to` or either index
/// is outside the vec bounds.
pub fn move_item<T>(vec: &mut Vec<T>, from: usize, to: usize) {
    if from == to || from >= vec.len() || to >= vec.len() {
        return;
    }

    let value = vec.remove(from);
    vec.insert(to, value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_toward_the_end() {
        let mut v = vec!['a', 'b', 'c', 'd'];
        move_item(&mut v, 1, 3);
        assert_eq!(v, vec!['a', 'c', 'd', 'b']);
    }

    #[test]
    fn moves_toward_the_start() {
        let mut v = vec!['a', 'b', 'c', 'd'];
        move_item(&mut v, 3, 0);
        assert_eq!(v, vec!['d', 'a', 'b', 'c']);
    }

    #[test]
    fn same_index_is_a_no_op() {
        let mut v = vec![1, 2, 3];
        move_item(&mut v, 1, 1);
        assert_eq!(v, vec![1, 2, 3]);
    }

    #[test]
    fn out_of_bounds_is_a_no_op() {
        let mut v = vec![1, 2, 3];
        move_item(&mut v, 5, 0);
        move_item(&mut v, 0, 3);
        assert_eq!(v, vec![1, 2, 3]);
    }
}
