use std::fmt;
use std::marker::PhantomData;

/// String identifier tagged with the entity it names, so a driver id can never
/// be passed where a route id is expected.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Hash)]
pub struct Id<T> {
    pub id: String,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    pub fn new(id: impl Into<String>) -> Self {
        Id { id: id.into(), _marker: PhantomData }
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl<T> From<Id<T>> for String {
    fn from(id_wrapper: Id<T>) -> Self {
        id_wrapper.id
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let full_name = std::any::type_name::<T>();
        let clean_name = full_name.split("::").last().unwrap_or(full_name);
        let display_name = clean_name.replace("Tag", "Id");

        write!(f, "{}: {:?}", display_name, self.id)
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct DriverTag;
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct RouteTag;
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct OrderTag;
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct SimulationRunTag;
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct OperatorTag;

pub type DriverId = Id<DriverTag>;
/// Business route code (`R001`), the key orders use to reference a route.
pub type RouteId = Id<RouteTag>;
pub type OrderId = Id<OrderTag>;
pub type SimulationRunId = Id<SimulationRunTag>;
pub type OperatorId = Id<OperatorTag>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_names_the_tag() {
        let id = DriverId::new("d-1");
        assert_eq!(format!("{:?}", id), "DriverId: \"d-1\"");
        assert_eq!(id.to_string(), "d-1");
    }

    #[test]
    fn ids_order_lexicographically() {
        let mut ids = vec![OrderId::new("ORD010"), OrderId::new("ORD002"), OrderId::new("ORD001")];
        ids.sort();
        assert_eq!(ids.iter().map(|i| i.as_str()).collect::<Vec<_>>(), vec!["ORD001", "ORD002", "ORD010"]);
    }
}
