use std::collections::BTreeSet;
use std::fmt;

/// A pair of alignment columns whose residues touch in the reference structure.
///
/// Always stored with `i < j`; sequence neighbours (`j - i <= 1`) are never contacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Contact {
    i: usize,
    j: usize,
}

impl Contact {
    /// Creates a contact from two columns in either order.
    ///
    /// Returns `None` for a column paired with itself or with its sequence neighbour.
    pub fn new(a: usize, b: usize) -> Option<Self> {
        let (i, j) = if a < b { (a, b) } else { (b, a) };
        if j - i <= 1 {
            return None;
        }
        Some(Self { i, j })
    }

    #[inline]
    pub fn i(&self) -> usize {
        self.i
    }

    #[inline]
    pub fn j(&self) -> usize {
        self.j
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.i, self.j)
    }
}

/// An ordered, duplicate-free set of contacts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSet {
    contacts: BTreeSet<Contact>,
}

impl ContactSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a contact, returning `false` if it was already present.
    pub fn insert(&mut self, contact: Contact) -> bool {
        self.contacts.insert(contact)
    }

    pub fn contains(&self, contact: &Contact) -> bool {
        self.contacts.contains(contact)
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter()
    }

    /// Largest column referenced by any contact.
    pub fn max_column(&self) -> Option<usize> {
        self.contacts.iter().map(Contact::j).max()
    }
}

impl FromIterator<Contact> for ContactSet {
    fn from_iter<I: IntoIterator<Item = Contact>>(iter: I) -> Self {
        Self {
            contacts: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ContactSet {
    type Item = &'a Contact;
    type IntoIter = std::collections::btree_set::Iter<'a, Contact>;

    fn into_iter(self) -> Self::IntoIter {
        self.contacts.iter()
    }
}
