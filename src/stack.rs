//! A singly-linked LIFO stack.
//!
//! Every node is owned either by the [`Stack`] itself (the top) or by the node
//! pushed right after it, so the chain can never branch or loop. The element
//! count is only touched by [`Stack::push`] and [`Stack::pop`], each of which
//! edits the chain by exactly one node.

use std::fmt;
use std::fmt::Write as _;

struct Node<T> {
    data: T,
    next: Link<T>,
}

type Link<T> = Option<Box<Node<T>>>;

/// Last-in first-out container of `T`.
///
/// Emptiness is reported through `Option`, never by panicking:
///
/// ```
/// use cookies::Stack;
///
/// let mut s = Stack::new();
/// s.push("Thing 1");
/// s.push("Thing 2");
///
/// assert_eq!(s.peek(), Some(&"Thing 2"));
/// assert_eq!(s.join_string(" | "), "Thing 2 | Thing 1");
/// assert_eq!(s.pop(), Some("Thing 2"));
/// assert_eq!(s.pop(), Some("Thing 1"));
/// assert_eq!(s.pop(), None);
/// ```
pub struct Stack<T> {
    top: Link<T>,
    size: usize,
}

impl<T> Stack<T> {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self { top: None, size: 0 }
    }

    /// Returns true when no elements are stored.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of elements on the stack.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Places `data` on top of the stack.
    pub fn push(&mut self, data: T) {
        let node = Box::new(Node {
            data,
            next: self.top.take(),
        });
        self.top = Some(node);
        self.size += 1;
    }

    /// Borrows the most recently pushed element, if any.
    pub fn peek(&self) -> Option<&T> {
        self.top.as_deref().map(|node| &node.data)
    }

    /// Mutable access to the top element.
    pub fn peek_mut(&mut self) -> Option<&mut T> {
        self.top.as_deref_mut().map(|node| &mut node.data)
    }

    /// Removes and returns the top element. Returns `None` and leaves the
    /// stack untouched when it is empty.
    pub fn pop(&mut self) -> Option<T> {
        self.top.take().map(|node| {
            let node = *node;
            self.top = node.next;
            self.size -= 1;
            node.data
        })
    }

    /// Drops every element.
    pub fn clear(&mut self) {
        while self.pop().is_some() {}
    }

    /// Iterates from the top of the stack down to the bottom.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.top.as_deref(),
            remaining: self.size,
        }
    }
}

impl<T: fmt::Display> Stack<T> {
    /// Renders every element, top first, separated by `delim`.
    ///
    /// There is no delimiter after the bottom element, and an empty stack
    /// yields an empty string.
    pub fn join_string(&self, delim: &str) -> String {
        let mut out = String::new();
        for (i, data) in self.iter().enumerate() {
            if i > 0 {
                out.push_str(delim);
            }
            // Writing into a String can't fail.
            let _ = write!(out, "{}", data);
        }
        out
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Stack<T> {
    fn drop(&mut self) {
        // Unlink node by node; the default drop would recurse once per node.
        let mut link = self.top.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

impl<T: fmt::Display> fmt::Display for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join_string(", "))
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for Stack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for data in iter {
            self.push(data);
        }
    }
}

impl<T> FromIterator<T> for Stack<T> {
    /// Pushes items in iteration order, so the last item ends up on top.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut stack = Stack::new();
        stack.extend(iter);
        stack
    }
}

/// Borrowing iterator over a [`Stack`], top to bottom.
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            self.remaining -= 1;
            &node.data
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Owning iterator that pops elements off a [`Stack`].
pub struct IntoIter<T>(Stack<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for Stack<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

impl<'a, T> IntoIterator for &'a Stack<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn things() -> Stack<String> {
        let mut s = Stack::new();
        s.push("Thing 1".to_string());
        s.push("Thing 2".to_string());
        s.push("Thing 3".to_string());
        s
    }

    #[test]
    fn test_new_stack_is_empty() {
        let s: Stack<i32> = Stack::new();
        assert!(s.is_empty());
        assert_eq!(s.len(), 0);
        assert_eq!(s.peek(), None);
    }

    #[test]
    fn test_pop_returns_reverse_insertion_order() {
        let mut s = Stack::new();
        for n in 0..10 {
            s.push(n);
        }
        assert_eq!(s.len(), 10);

        for n in (0..10).rev() {
            assert_eq!(s.pop(), Some(n));
        }
        assert!(s.is_empty());
        assert_eq!(s.len(), 0);
    }

    #[test]
    fn test_pop_on_empty_keeps_state() {
        let mut s: Stack<&str> = Stack::new();
        assert_eq!(s.pop(), None);
        assert_eq!(s.len(), 0);
        assert!(s.is_empty());

        s.push("a");
        assert_eq!(s.pop(), Some("a"));
        assert_eq!(s.pop(), None);
        assert_eq!(s.pop(), None);
        assert_eq!(s.len(), 0);
    }

    #[test]
    fn test_peek_does_not_mutate() {
        let s = things();
        assert_eq!(s.peek().map(String::as_str), Some("Thing 3"));
        assert_eq!(s.peek().map(String::as_str), Some("Thing 3"));
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn test_peek_mut_updates_top() {
        let mut s = things();
        if let Some(top) = s.peek_mut() {
            top.push('!');
        }
        assert_eq!(s.pop().as_deref(), Some("Thing 3!"));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn test_join_string_top_first() {
        let mut s = Stack::new();
        s.push("A");
        s.push("B");
        s.push("C");
        assert_eq!(s.join_string("-"), "C-B-A");
        assert_eq!(s.join_string(""), "CBA");
    }

    #[test]
    fn test_join_string_empty_and_single() {
        let mut s = Stack::new();
        assert_eq!(s.join_string(", "), "");

        s.push(42);
        assert_eq!(s.join_string(", "), "42");
    }

    #[test]
    fn test_display_uses_comma_delimiter() {
        let s = things();
        assert_eq!(s.to_string(), "Thing 3, Thing 2, Thing 1");
        assert_eq!(format!("{:?}", s), r#"["Thing 3", "Thing 2", "Thing 1"]"#);
    }

    #[test]
    fn test_things_scenario() {
        let mut s = things();
        assert_eq!(s.join_string("\n"), "Thing 3\nThing 2\nThing 1");

        assert_eq!(s.pop().as_deref(), Some("Thing 3"));
        assert_eq!(s.join_string("\n"), "Thing 2\nThing 1");

        while s.pop().is_some() {}
        assert!(s.is_empty());
        assert_eq!(s.pop(), None);
    }

    #[test]
    fn test_iter_visits_each_node_once() {
        let s: Stack<u32> = (1..=5).collect();
        let seen: Vec<u32> = s.iter().copied().collect();
        assert_eq!(seen, vec![5, 4, 3, 2, 1]);
        assert_eq!(s.iter().len(), s.len());

        let mut it = s.iter();
        it.next();
        assert_eq!(it.len(), 4);
    }

    #[test]
    fn test_into_iter_drains_from_top() {
        let mut s: Stack<char> = "abc".chars().collect();
        s.extend(['d', 'e']);
        let drained: String = s.into_iter().collect();
        assert_eq!(drained, "edcba");
    }

    #[test]
    fn test_clear_resets_size() {
        let mut s = things();
        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.join_string(","), "");
        s.push("again".to_string());
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_drop_long_stack_does_not_overflow() {
        let mut s = Stack::new();
        for n in 0..200_000 {
            s.push(n);
        }
        assert_eq!(s.len(), 200_000);
        drop(s);
    }
}
