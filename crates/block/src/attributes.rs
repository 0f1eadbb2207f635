/// Marker bound for an opaque attribute tag carried by a [`crate::Block`].
///
/// The core never inspects the contents of an attribute value — it only ever
/// compares two of them for equality to decide whether adjacent bytes belong
/// to the same block. `Default` supplies the "no attribute" tag a fresh,
/// empty buffer starts with.
pub trait Attributes: Clone + PartialEq + std::fmt::Debug + Default {}

impl<T: Clone + PartialEq + std::fmt::Debug + Default> Attributes for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Style {
        bold: bool,
    }

    fn assert_attributes<A: Attributes>() {}

    #[test]
    fn any_clone_eq_debug_type_qualifies() {
        assert_attributes::<Style>();
        assert_attributes::<()>();
        assert_attributes::<u32>();
    }
}
