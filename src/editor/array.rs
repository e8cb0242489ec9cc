//! Generic editable array
//!
//! One add/remove/update-over-an-array component shared by the condition
//! editors and the order-leg editor (the broker field-definition surface
//! follows the same pattern). Out-of-bounds indices are programming errors
//! surfaced as [`ConsoleError::IndexOutOfBounds`], not user-facing failures:
//! a well-behaved caller only passes indices it obtained from this editor.

use crate::common::errors::{ConsoleError, Result};

/// An ordered, editable sequence of rows
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayEditor<T> {
    /// Editor name used in error messages
    name: &'static str,
    items: Vec<T>,
}

impl<T> ArrayEditor<T> {
    pub fn new(name: &'static str, items: Vec<T>) -> Self {
        Self { name, items }
    }

    pub fn empty(name: &'static str) -> Self {
        Self::new(name, Vec::new())
    }

    /// Append a row. Always succeeds; there is no capacity limit.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Remove and return the row at `index`
    pub fn remove(&mut self, index: usize) -> Result<T> {
        if index >= self.items.len() {
            return Err(self.out_of_bounds(index));
        }
        Ok(self.items.remove(index))
    }

    /// Mutate the row at `index` in place
    pub fn update<F: FnOnce(&mut T)>(&mut self, index: usize, f: F) -> Result<()> {
        match self.items.get_mut(index) {
            Some(item) => {
                f(item);
                Ok(())
            }
            None => Err(self.out_of_bounds(index)),
        }
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    fn out_of_bounds(&self, index: usize) -> ConsoleError {
        ConsoleError::IndexOutOfBounds {
            editor: self.name,
            index,
            len: self.items.len(),
        }
    }
}

impl<T> IntoIterator for ArrayEditor<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_remove_roundtrip() {
        let mut editor = ArrayEditor::empty("rows");
        editor.push(1);
        editor.push(2);
        editor.push(3);
        assert_eq!(editor.remove(1).unwrap(), 2);
        assert_eq!(editor.items(), &[1, 3]);
    }

    #[test]
    fn test_update_in_place() {
        let mut editor = ArrayEditor::new("rows", vec![10, 20]);
        editor.update(1, |v| *v += 5).unwrap();
        assert_eq!(editor.items(), &[10, 25]);
    }

    #[test]
    fn test_out_of_bounds_is_an_error() {
        let mut editor: ArrayEditor<i32> = ArrayEditor::empty("rows");
        let err = editor.remove(0).unwrap_err();
        assert!(matches!(
            err,
            ConsoleError::IndexOutOfBounds {
                editor: "rows",
                index: 0,
                len: 0
            }
        ));
        assert!(editor.update(7, |_| ()).is_err());
    }
}
