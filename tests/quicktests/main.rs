use quickcheck::{Arbitrary, Gen};

mod map;

/// An enum for the various kinds of "things" to do to
/// a map in a quicktest.
#[derive(Copy, Clone, Debug)]
pub enum Op<K, V> {
    /// Insert the K, V into the data structure
    Insert(K, V),
    /// Remove the K from the data structure
    Remove(K),
}

impl<K, V> Arbitrary for Op<K, V>
where
    K: Arbitrary,
    V: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            Op::Insert(K::arbitrary(g), V::arbitrary(g))
        } else {
            Op::Remove(K::arbitrary(g))
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match self {
            Op::Insert(k, v) => {
                let v = v.clone();
                Box::new(k.shrink().map(move |k| Op::Insert(k, v.clone())))
            }
            Op::Remove(k) => Box::new(k.shrink().map(Op::Remove)),
        }
    }
}
