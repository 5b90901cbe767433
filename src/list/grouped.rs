//! Group handles and the deferred grouping producer.

use std::fmt;
use std::rc::Rc;

use super::{List, Queryable};
use crate::group::{group_items, Bucket, BucketContents};
use crate::sequence::{Cursor, ItemsCursor, Producer, Source};
use crate::sort::KeySpec;

/// One group of a `group_by`: a list of items plus the key they share.
///
/// Any chainable operator applied to a group returns a plain [`List`]; the
/// key does not travel along.
pub struct GroupedList<K, T> {
    list: List<T>,
    key: K,
}

impl<K, T> GroupedList<K, T> {
    /// Creates a group over concrete items.
    pub fn new(key: K, items: Vec<T>) -> Self {
        Self {
            list: List::from_source(Source::Items(Rc::from(items))),
            key,
        }
    }

    /// The key shared by the group's items.
    #[inline]
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Returns the group as a plain list.
    #[inline]
    pub const fn list(&self) -> &List<T> {
        &self.list
    }

    /// Drops the key.
    #[inline]
    pub fn into_list(self) -> List<T> {
        self.list
    }

    /// Splits the group into its key and list.
    #[inline]
    pub fn into_parts(self) -> (K, List<T>) {
        (self.key, self.list)
    }
}

impl<K, T: Clone + 'static> Queryable<T> for GroupedList<K, T> {
    #[inline]
    fn as_list(&self) -> &List<T> {
        &self.list
    }
}

impl<K: Clone, T> Clone for GroupedList<K, T> {
    fn clone(&self) -> Self {
        Self {
            list: self.list.clone(),
            key: self.key.clone(),
        }
    }
}

impl<K: fmt::Debug, T: fmt::Debug> fmt::Debug for GroupedList<K, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("GroupedList")
            .field("key", &self.key)
            .field("source", self.list.source())
            .finish()
    }
}

/// A node of a multi-level grouping.
///
/// Groups of the last level are leaves holding items; groups of every other
/// level are branches holding the next level's nodes.
pub enum GroupNode<K, T> {
    /// A group of items.
    Leaf(GroupedList<K, T>),
    /// A group of sub-groups.
    Branch(GroupedList<K, Self>),
}

impl<K, T> GroupNode<K, T> {
    /// The node's key.
    pub const fn key(&self) -> &K {
        match self {
            Self::Leaf(group) => group.key(),
            Self::Branch(group) => group.key(),
        }
    }

    /// Returns `true` for [`GroupNode::Leaf`].
    #[inline]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    pub(crate) fn from_bucket(bucket: Bucket<K, T>) -> Self {
        match bucket.contents {
            BucketContents::Items(items) => Self::Leaf(GroupedList::new(bucket.key, items)),
            BucketContents::Buckets(children) => Self::Branch(GroupedList::new(
                bucket.key,
                children.into_iter().map(Self::from_bucket).collect(),
            )),
        }
    }
}

impl<K: Clone + 'static, T: Clone + 'static> GroupNode<K, T> {
    /// Every item below the node, depth first.
    pub fn items(&self) -> Vec<T> {
        match self {
            Self::Leaf(group) => group.to_vec(),
            Self::Branch(group) => group.cursor().flat_map(|child| child.items()).collect(),
        }
    }

    /// The node's direct children, or `None` for a leaf.
    pub fn children(&self) -> Option<Vec<Self>> {
        match self {
            Self::Leaf(_) => None,
            Self::Branch(group) => Some(group.to_vec()),
        }
    }
}

impl<K: Clone, T> Clone for GroupNode<K, T> {
    fn clone(&self) -> Self {
        match self {
            Self::Leaf(group) => Self::Leaf(group.clone()),
            Self::Branch(group) => Self::Branch(group.clone()),
        }
    }
}

impl<K: fmt::Debug, T: fmt::Debug> fmt::Debug for GroupNode<K, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(group) => formatter.debug_tuple("Leaf").field(group).finish(),
            Self::Branch(group) => formatter.debug_tuple("Branch").field(group).finish(),
        }
    }
}

/// Deferred grouping: drains and groups the source on the first pull of a
/// pass, then yields one `G` per top-level bucket.
pub(crate) struct Grouping<T, K, G> {
    source: Source<T>,
    levels: Rc<[KeySpec<T, K>]>,
    build: fn(Bucket<K, T>) -> G,
}

impl<T, K, G> Grouping<T, K, G> {
    pub(crate) const fn new(
        source: Source<T>,
        levels: Rc<[KeySpec<T, K>]>,
        build: fn(Bucket<K, T>) -> G,
    ) -> Self {
        Self {
            source,
            levels,
            build,
        }
    }
}

impl<T, K, G> Producer<G> for Grouping<T, K, G>
where
    T: Clone + 'static,
    K: 'static,
    G: Clone + 'static,
{
    fn produce(&self) -> Cursor<G> {
        let source = self.source.clone();
        let levels = Rc::clone(&self.levels);
        let build = self.build;
        let mut groups: Option<ItemsCursor<G>> = None;
        Box::new(std::iter::from_fn(move || {
            groups
                .get_or_insert_with(|| {
                    let buckets = group_items(&source.drain(), &levels);
                    ItemsCursor::new(buckets.into_iter().map(build).collect())
                })
                .next()
        }))
    }
}

#[cfg(feature = "serde")]
mod serde_support {
    use super::{GroupNode, GroupedList};
    use serde::ser::{Serialize, SerializeStruct, Serializer};

    impl<K: Serialize, T: Serialize + Clone + 'static> Serialize for GroupedList<K, T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut state = serializer.serialize_struct("GroupedList", 2)?;
            state.serialize_field("key", &self.key)?;
            state.serialize_field("items", &self.list)?;
            state.end()
        }
    }

    impl<K: Serialize + Clone + 'static, T: Serialize + Clone + 'static> Serialize for GroupNode<K, T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Self::Leaf(group) => group.serialize(serializer),
                Self::Branch(group) => group.serialize(serializer),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::SortDirection;
    use rstest::rstest;

    #[derive(Clone, Debug, PartialEq)]
    struct Sale {
        region: &'static str,
        product: &'static str,
        amount: u32,
    }

    fn sales() -> List<Sale> {
        List::from(vec![
            Sale { region: "west", product: "tea", amount: 3 },
            Sale { region: "east", product: "tea", amount: 5 },
            Sale { region: "west", product: "cake", amount: 2 },
            Sale { region: "east", product: "tea", amount: 1 },
        ])
    }

    #[rstest]
    fn group_by_yields_keyed_groups() {
        let groups = sales().group_by(|sale| sale.region).to_vec();
        let keys: Vec<&str> = groups.iter().map(|group| *group.key()).collect();
        assert_eq!(keys, vec!["east", "west"]);
        assert_eq!(groups[0].map(|sale| sale.amount).to_vec(), vec![5, 1]);
        assert_eq!(groups[1].map(|sale| sale.amount).to_vec(), vec![3, 2]);
    }

    #[rstest]
    fn group_by_descending_reverses_group_order() {
        let groups = sales().group_by_descending(|sale| sale.amount > 2).to_vec();
        assert!(*groups[0].key());
        assert_eq!(groups[0].count(), 2);
        assert_eq!(groups[1].count(), 2);
    }

    #[rstest]
    fn operators_on_a_group_return_plain_lists() {
        let groups = sales().group_by(|sale| sale.region).to_vec();
        let totals: List<u32> = groups[1].map(|sale| sale.amount);
        assert_eq!(totals.fold(0, |sum, amount| sum + amount), 5);
    }

    #[rstest]
    fn group_by_levels_nests_groups() {
        let tree = sales()
            .group_by_levels(vec![
                KeySpec::ascending(|sale: &Sale| sale.region),
                KeySpec::new(
                    |sale: &Sale| sale.product,
                    |left: &&str, right: &&str| left.cmp(right),
                    SortDirection::Ascending,
                ),
            ])
            .to_vec();

        assert_eq!(tree.len(), 2);
        assert!(!tree[0].is_leaf());
        assert_eq!(*tree[0].key(), "east");
        assert_eq!(tree[0].items().len(), 2);

        let west = tree[1].children().unwrap_or_default();
        let products: Vec<&str> = west.iter().map(|node| *node.key()).collect();
        assert_eq!(products, vec!["cake", "tea"]);
        assert!(west.iter().all(GroupNode::is_leaf));
    }

    #[rstest]
    fn group_by_levels_without_levels_is_empty() {
        let levels: Vec<KeySpec<Sale, &'static str>> = Vec::new();
        assert!(sales().group_by_levels(levels).is_empty());
    }

    #[rstest]
    fn grouping_is_deferred() {
        let source: List<i32> = List::from_producer(crate::sequence::Generator::new(|| -> Vec<i32> {
            panic!("grouping must not evaluate its source before it is pulled")
        }));
        let groups = source.group_by(|number| *number);
        assert!(!groups.is_evaluated());
    }
}
