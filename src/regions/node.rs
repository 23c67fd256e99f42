//! Composable region trees with union, intersection and difference logic.
use super::config::MaskConfig;
use super::error::RegionError;
use super::key::{sample_count, AxisKey, Mask, PositionMap};
use super::operations::{
    combine_difference, combine_intersection, combine_symmetric_difference, combine_union,
};
use super::region::Region;
use super::shapes::{Circle, Rectangle};
use std::fmt::Display;
use std::ops::{BitAnd, BitOr, BitXor, Sub};
use std::sync::Arc;

/// Region tree node: leaf (concrete shape) or binary combinator.
///
/// Trees describe inclusion/exclusion areas:
/// - **Leaf**: Wraps a concrete [`Region`] such as a [`Rectangle`] or [`Circle`]
/// - **Union**: samples in either child
/// - **Intersection**: samples in both children
/// - **Difference**: samples in `left` but not in `right`
/// - **SymmetricDifference**: samples in exactly one child
///
/// Children are held behind `Arc`, so a subtree can appear in several trees
/// and whole trees can be shared across threads without deep cloning. Nodes
/// are never mutated once built.
#[derive(Debug, Clone)]
pub enum RegionNode<K: AxisKey> {
    Leaf(Arc<dyn Region<K>>),
    Union(Arc<RegionNode<K>>, Arc<RegionNode<K>>),
    Intersection(Arc<RegionNode<K>>, Arc<RegionNode<K>>),
    Difference(Arc<RegionNode<K>>, Arc<RegionNode<K>>),
    SymmetricDifference(Arc<RegionNode<K>>, Arc<RegionNode<K>>),
}

impl<K: AxisKey> RegionNode<K> {
    pub fn leaf(region: impl Region<K> + 'static) -> Self {
        RegionNode::Leaf(Arc::new(region))
    }

    /// Creates a union node (OR logic).
    pub fn union_of(left: impl Into<Self>, right: impl Into<Self>) -> Self {
        RegionNode::Union(Arc::new(left.into()), Arc::new(right.into()))
    }

    /// Creates an intersection node (AND logic).
    pub fn intersection_of(left: impl Into<Self>, right: impl Into<Self>) -> Self {
        RegionNode::Intersection(Arc::new(left.into()), Arc::new(right.into()))
    }

    /// Creates a difference node: `left` with `right` cut out.
    pub fn difference_of(left: impl Into<Self>, right: impl Into<Self>) -> Self {
        RegionNode::Difference(Arc::new(left.into()), Arc::new(right.into()))
    }

    /// Creates a symmetric difference node (XOR logic).
    pub fn symmetric_difference_of(left: impl Into<Self>, right: impl Into<Self>) -> Self {
        RegionNode::SymmetricDifference(Arc::new(left.into()), Arc::new(right.into()))
    }

    pub fn or(self, other: impl Into<Self>) -> Self {
        Self::union_of(self, other)
    }

    pub fn and(self, other: impl Into<Self>) -> Self {
        Self::intersection_of(self, other)
    }

    pub fn minus(self, other: impl Into<Self>) -> Self {
        Self::difference_of(self, other)
    }

    pub fn xor(self, other: impl Into<Self>) -> Self {
        Self::symmetric_difference_of(self, other)
    }

    /// Evaluates the tree with the default [`MaskConfig`].
    pub fn mask(&self, positions: &PositionMap<K>) -> Result<Mask, RegionError> {
        self.mask_with(positions, &MaskConfig::default())
    }

    /// Recursively evaluates the tree, returning one boolean per sample.
    ///
    /// The first failure anywhere in the tree aborts the evaluation; there is
    /// no partial result. `config` also reaches trees nested as leaves.
    pub fn mask_with(
        &self,
        positions: &PositionMap<K>,
        config: &MaskConfig,
    ) -> Result<Mask, RegionError> {
        let mask = self.evaluate(positions, config, self.should_fork(positions, config))?;

        tracing::debug!(
            nodes = self.node_count(),
            samples = mask.len(),
            selected = mask.iter().filter(|&&inside| inside).count(),
            "evaluated region tree"
        );
        Ok(mask)
    }

    /// Fork decision for this tree, sized by the axes it actually reads.
    fn should_fork(&self, positions: &PositionMap<K>, config: &MaskConfig) -> bool {
        config.should_fork(sample_count(positions, &self.axis_keys()))
    }

    fn evaluate(
        &self,
        positions: &PositionMap<K>,
        config: &MaskConfig,
        fork: bool,
    ) -> Result<Mask, RegionError> {
        let label = || self.stringify();
        match self {
            RegionNode::Leaf(region) => region.mask_with(positions, config),
            RegionNode::Union(left, right) => {
                let (l, r) = Self::evaluate_children(left, right, positions, config, fork)?;
                combine_union(&l, &r, label)
            }
            RegionNode::Intersection(left, right) => {
                let (l, r) = Self::evaluate_children(left, right, positions, config, fork)?;
                combine_intersection(&l, &r, label)
            }
            RegionNode::Difference(left, right) => {
                let (l, r) = Self::evaluate_children(left, right, positions, config, fork)?;
                combine_difference(&l, &r, label)
            }
            RegionNode::SymmetricDifference(left, right) => {
                let (l, r) = Self::evaluate_children(left, right, positions, config, fork)?;
                combine_symmetric_difference(&l, &r, label)
            }
        }
    }

    fn evaluate_children(
        left: &Self,
        right: &Self,
        positions: &PositionMap<K>,
        config: &MaskConfig,
        fork: bool,
    ) -> Result<(Mask, Mask), RegionError> {
        #[cfg(feature = "parallel")]
        {
            if fork {
                let (l, r) = rayon::join(
                    || left.evaluate(positions, config, fork),
                    || right.evaluate(positions, config, fork),
                );
                return Ok((l?, r?));
            }
        }

        Ok((
            left.evaluate(positions, config, fork)?,
            right.evaluate(positions, config, fork)?,
        ))
    }

    pub fn stringify(&self) -> String {
        match self {
            RegionNode::Leaf(region) => region.stringify(),
            RegionNode::Union(left, right) => {
                format!("Union({} ∪ {})", left.stringify(), right.stringify())
            }
            RegionNode::Intersection(left, right) => {
                format!("Intersection({} ∩ {})", left.stringify(), right.stringify())
            }
            RegionNode::Difference(left, right) => {
                format!("Difference({} ∖ {})", left.stringify(), right.stringify())
            }
            RegionNode::SymmetricDifference(left, right) => format!(
                "SymmetricDifference({} △ {})",
                left.stringify(),
                right.stringify()
            ),
        }
    }

    /// Prints the tree structure in a human-readable format.
    ///
    /// # Arguments
    ///
    /// * `indent` - The current indentation level (use 0 for the root)
    pub fn print_tree(&self, indent: usize) {
        let prefix = "  ".repeat(indent);
        match self {
            RegionNode::Leaf(region) => {
                println!("{}└─ Leaf: {}", prefix, region.stringify());
            }
            RegionNode::Union(left, right)
            | RegionNode::Intersection(left, right)
            | RegionNode::Difference(left, right)
            | RegionNode::SymmetricDifference(left, right) => {
                println!("{}└─ {}", prefix, self.kind());
                left.print_tree(indent + 1);
                right.print_tree(indent + 1);
            }
        }
    }

    /// Name of the node variant.
    pub fn kind(&self) -> &'static str {
        match self {
            RegionNode::Leaf(_) => "Leaf",
            RegionNode::Union(..) => "Union",
            RegionNode::Intersection(..) => "Intersection",
            RegionNode::Difference(..) => "Difference",
            RegionNode::SymmetricDifference(..) => "SymmetricDifference",
        }
    }
}

impl<K: AxisKey> Region<K> for RegionNode<K> {
    fn mask(&self, positions: &PositionMap<K>) -> Result<Mask, RegionError> {
        RegionNode::mask(self, positions)
    }

    /// Nested inside another tree: evaluates without a separate log event.
    fn mask_with(&self, positions: &PositionMap<K>, config: &MaskConfig) -> Result<Mask, RegionError> {
        self.evaluate(positions, config, self.should_fork(positions, config))
    }

    fn axis_keys(&self) -> Vec<K> {
        RegionNode::axis_keys(self).into_iter().collect()
    }

    fn stringify(&self) -> String {
        RegionNode::stringify(self)
    }
}

impl<K: AxisKey> Display for RegionNode<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.stringify())
    }
}

impl<K: AxisKey> From<Rectangle<K>> for RegionNode<K> {
    fn from(rectangle: Rectangle<K>) -> Self {
        RegionNode::leaf(rectangle)
    }
}

impl<K: AxisKey> From<Circle<K>> for RegionNode<K> {
    fn from(circle: Circle<K>) -> Self {
        RegionNode::leaf(circle)
    }
}

impl<K: AxisKey> From<&RegionNode<K>> for RegionNode<K> {
    fn from(node: &RegionNode<K>) -> Self {
        node.clone()
    }
}

/// Operator sugar over the named constructors: `|` union, `&` intersection,
/// `-` difference, `^` symmetric difference. Only region operands convert
/// into a [`RegionNode`], so mixing in anything else does not compile.
macro_rules! region_operators {
    ($($lhs:ty),* $(,)?) => {
        $(
            impl<K: AxisKey, R: Into<RegionNode<K>>> BitOr<R> for $lhs {
                type Output = RegionNode<K>;

                fn bitor(self, rhs: R) -> RegionNode<K> {
                    RegionNode::union_of(self, rhs)
                }
            }

            impl<K: AxisKey, R: Into<RegionNode<K>>> BitAnd<R> for $lhs {
                type Output = RegionNode<K>;

                fn bitand(self, rhs: R) -> RegionNode<K> {
                    RegionNode::intersection_of(self, rhs)
                }
            }

            impl<K: AxisKey, R: Into<RegionNode<K>>> Sub<R> for $lhs {
                type Output = RegionNode<K>;

                fn sub(self, rhs: R) -> RegionNode<K> {
                    RegionNode::difference_of(self, rhs)
                }
            }

            impl<K: AxisKey, R: Into<RegionNode<K>>> BitXor<R> for $lhs {
                type Output = RegionNode<K>;

                fn bitxor(self, rhs: R) -> RegionNode<K> {
                    RegionNode::symmetric_difference_of(self, rhs)
                }
            }
        )*
    };
}

region_operators!(RegionNode<K>, Rectangle<K>, Circle<K>);

impl<'a, K: AxisKey, R: Into<RegionNode<K>>> BitOr<R> for &'a RegionNode<K> {
    type Output = RegionNode<K>;

    fn bitor(self, rhs: R) -> RegionNode<K> {
        RegionNode::union_of(self, rhs)
    }
}

impl<'a, K: AxisKey, R: Into<RegionNode<K>>> BitAnd<R> for &'a RegionNode<K> {
    type Output = RegionNode<K>;

    fn bitand(self, rhs: R) -> RegionNode<K> {
        RegionNode::intersection_of(self, rhs)
    }
}

impl<'a, K: AxisKey, R: Into<RegionNode<K>>> Sub<R> for &'a RegionNode<K> {
    type Output = RegionNode<K>;

    fn sub(self, rhs: R) -> RegionNode<K> {
        RegionNode::difference_of(self, rhs)
    }
}

impl<'a, K: AxisKey, R: Into<RegionNode<K>>> BitXor<R> for &'a RegionNode<K> {
    type Output = RegionNode<K>;

    fn bitxor(self, rhs: R) -> RegionNode<K> {
        RegionNode::symmetric_difference_of(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn rectangle() -> Rectangle<&'static str> {
        Rectangle::new("x", "y", 0.0, 10.0, 0.0, 5.0)
    }

    fn circle() -> Circle<&'static str> {
        Circle::new("x", "y", 0.0, 0.0, 5.0)
    }

    fn positions() -> PositionMap<&'static str> {
        PositionMap::from([
            ("x", array![5.0, 15.0, 3.0, -4.0, -6.0]),
            ("y", array![2.0, 2.0, 4.0, 3.0, 6.0]),
        ])
    }

    #[test]
    fn test_union_node() {
        // rectangle: [T, F, T, F, F], circle: [F, F, T, T, F]
        let union = RegionNode::union_of(rectangle(), circle());
        assert_eq!(
            union.mask(&positions()).unwrap(),
            array![true, false, true, true, false]
        );
    }

    #[test]
    fn test_intersection_node() {
        let intersection = rectangle() & circle();
        assert_eq!(
            intersection.mask(&positions()).unwrap(),
            array![false, false, true, false, false]
        );
    }

    #[test]
    fn test_difference_node() {
        let difference = rectangle() - circle();
        assert_eq!(
            difference.mask(&positions()).unwrap(),
            array![true, false, false, false, false]
        );

        let reversed = circle() - rectangle();
        assert_eq!(
            reversed.mask(&positions()).unwrap(),
            array![false, false, false, true, false]
        );
    }

    #[test]
    fn test_symmetric_difference_node() {
        let xor = rectangle() ^ circle();
        assert_eq!(
            xor.mask(&positions()).unwrap(),
            array![true, false, false, true, false]
        );
    }

    #[test]
    fn test_named_methods_match_operators() {
        let a = RegionNode::from(rectangle());
        let b = RegionNode::from(circle());
        let p = positions();
        assert_eq!(
            a.clone().or(&b).mask(&p).unwrap(),
            (&a | &b).mask(&p).unwrap()
        );
        assert_eq!(
            a.clone().and(&b).mask(&p).unwrap(),
            (&a & &b).mask(&p).unwrap()
        );
        assert_eq!(
            a.clone().minus(&b).mask(&p).unwrap(),
            (&a - &b).mask(&p).unwrap()
        );
        assert_eq!(
            a.clone().xor(&b).mask(&p).unwrap(),
            (&a ^ &b).mask(&p).unwrap()
        );
    }

    #[test]
    fn test_complex_tree() {
        // (rectangle ∪ circle) ∖ small hole at the origin
        let hole = Circle::new("x", "y", 0.0, 0.0, 1.0);
        let tree = (rectangle() | circle()) - hole;
        let p = PositionMap::from([
            ("x", array![0.5, 3.0, 8.0, 20.0]),
            ("y", array![0.5, 3.0, 1.0, 0.0]),
        ]);
        assert_eq!(tree.mask(&p).unwrap(), array![false, true, true, false]);
    }

    #[test]
    fn test_missing_key_aborts_whole_tree() {
        let tree = rectangle() | Rectangle::new("x", "z", 0.0, 1.0, 0.0, 1.0);
        let err = tree.mask(&positions()).unwrap_err();
        match err {
            RegionError::MissingAxisKey { region, key } => {
                assert_eq!(key, "\"z\"");
                assert!(region.starts_with("Rectangle("));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_child_length_mismatch() {
        let other = Circle::new("u", "v", 0.0, 0.0, 1.0);
        let tree = rectangle() | other;
        let mut p = positions();
        p.insert("u", array![0.0, 0.0]);
        p.insert("v", array![0.0, 0.0]);
        let err = tree.mask(&p).unwrap_err();
        match err {
            RegionError::ShapeMismatch {
                region,
                left,
                right,
            } => {
                assert!(region.starts_with("Union("));
                assert_eq!((left, right), (5, 2));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_sequential_and_default_config_agree() {
        let tree = (rectangle() ^ circle()) | Circle::new("x", "y", -6.0, 6.0, 0.5);
        let p = positions();
        let eager = tree
            .mask_with(
                &p,
                &MaskConfig {
                    parallel: true,
                    parallel_threshold: 0,
                },
            )
            .unwrap();
        assert_eq!(eager, tree.mask_with(&p, &MaskConfig::sequential()).unwrap());
        assert_eq!(eager, array![true, false, false, true, true]);
    }

    #[test]
    fn test_stringify_format() {
        let tree = rectangle() - circle();
        let s = tree.to_string();
        assert!(s.starts_with("Difference(Rectangle("));
        assert!(s.contains(" ∖ Circle("));
        assert_eq!(tree.kind(), "Difference");
    }

    #[test]
    fn test_region_trait_impl_does_not_recurse() {
        let tree = RegionNode::from(circle());
        let as_trait: Arc<dyn Region<&'static str>> = Arc::new(tree);
        assert_eq!(
            as_trait.mask(&positions()).unwrap(),
            array![false, false, true, true, false]
        );
        let mut keys = as_trait.axis_keys();
        keys.sort();
        assert_eq!(keys, vec!["x", "y"]);
    }

    #[test]
    fn test_custom_leaf_region() {
        #[derive(Debug)]
        struct UpperHalf;

        impl Region<&'static str> for UpperHalf {
            fn mask(&self, positions: &PositionMap<&'static str>) -> Result<Mask, RegionError> {
                let ys = positions
                    .get("y")
                    .ok_or_else(|| RegionError::MissingAxisKey {
                        region: self.stringify(),
                        key: "\"y\"".to_string(),
                    })?;
                Ok(ys.mapv(|y| y >= 3.0))
            }

            fn axis_keys(&self) -> Vec<&'static str> {
                vec!["y"]
            }

            fn stringify(&self) -> String {
                "UpperHalf".to_string()
            }
        }

        let tree = RegionNode::leaf(UpperHalf) & rectangle();
        assert_eq!(
            tree.mask(&positions()).unwrap(),
            array![false, false, true, false, false]
        );
    }

    #[test]
    fn test_nested_tree_receives_outer_config() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        #[derive(Debug, Default)]
        struct ThresholdRecorder {
            seen: Arc<AtomicUsize>,
        }

        impl Region<&'static str> for ThresholdRecorder {
            fn mask(&self, positions: &PositionMap<&'static str>) -> Result<Mask, RegionError> {
                self.mask_with(positions, &MaskConfig::default())
            }

            fn mask_with(
                &self,
                positions: &PositionMap<&'static str>,
                config: &MaskConfig,
            ) -> Result<Mask, RegionError> {
                self.seen.store(config.parallel_threshold, Ordering::SeqCst);
                Ok(Mask::from_elem(positions["x"].len(), true))
            }

            fn axis_keys(&self) -> Vec<&'static str> {
                vec!["x"]
            }

            fn stringify(&self) -> String {
                "ThresholdRecorder".to_string()
            }
        }

        let seen = Arc::new(AtomicUsize::new(0));
        let inner = RegionNode::leaf(ThresholdRecorder { seen: seen.clone() }) & rectangle();
        let outer = RegionNode::leaf(inner) | circle();
        let config = MaskConfig {
            parallel: false,
            parallel_threshold: 7,
        };

        let mask = outer.mask_with(&positions(), &config).unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 7);
        assert_eq!(mask, array![true, false, true, true, false]);
    }

    #[test]
    fn test_print_tree_does_not_panic() {
        ((rectangle() | circle()) ^ rectangle()).print_tree(0);
    }
}
