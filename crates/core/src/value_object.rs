/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values
/// (a budget key, a currency). To "modify" one, build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
