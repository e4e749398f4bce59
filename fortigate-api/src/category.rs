use std::fmt::{self, Display, Formatter};

/// CMDB path of the virtual domain table.
pub const VDOM_PATH: &str = "system/vdom";
/// Natural key of a virtual domain.
pub const VDOM_KEY_FIELD: &str = "name";

/// Per-vdom configuration categories copied between appliances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Interface,
    Zone,
    StaticRoute,
    PolicyRoute,
    Address,
    AddressGroup,
    Service,
    ServiceGroup,
    Policy,
}

impl Category {
    /// Every category, ordered so referenced objects are created before the
    /// objects that reference them.
    pub const ALL: [Category; 9] = [
        Category::Interface,
        Category::Zone,
        Category::StaticRoute,
        Category::PolicyRoute,
        Category::Address,
        Category::AddressGroup,
        Category::Service,
        Category::ServiceGroup,
        Category::Policy,
    ];

    /// Field that uniquely identifies an object within this category.
    pub fn key_field(self) -> &'static str {
        match self {
            Category::StaticRoute | Category::PolicyRoute => "seq-num",
            Category::Policy => "policyid",
            _ => "name",
        }
    }

    /// CMDB path (relative to `/api/v2/cmdb/`).
    pub fn path(self) -> &'static str {
        match self {
            Category::Interface => "system/interface",
            Category::Zone => "system/zone",
            Category::StaticRoute => "router/static",
            Category::PolicyRoute => "router/policy",
            Category::Address => "firewall/address",
            Category::AddressGroup => "firewall/addrgrp",
            Category::Service => "firewall.service/custom",
            Category::ServiceGroup => "firewall.service/group",
            Category::Policy => "firewall/policy",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Interface => "interface",
            Category::Zone => "zone",
            Category::StaticRoute => "static route",
            Category::PolicyRoute => "policy route",
            Category::Address => "address",
            Category::AddressGroup => "address group",
            Category::Service => "service",
            Category::ServiceGroup => "service group",
            Category::Policy => "policy",
        }
    }

    /// Whether the listing endpoint returns objects of every vdom and must be
    /// filtered client-side.
    pub fn scoped_by_vdom(self) -> bool {
        matches!(self, Category::Interface | Category::Zone)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::Category;

    #[test]
    fn addresses_and_services_precede_policies() {
        let pos = |c: Category| Category::ALL.iter().position(|x| *x == c).expect("listed");
        assert!(pos(Category::Address) < pos(Category::AddressGroup));
        assert!(pos(Category::Service) < pos(Category::ServiceGroup));
        assert!(pos(Category::Interface) < pos(Category::Zone));
        assert_eq!(pos(Category::Policy), Category::ALL.len() - 1);
    }

    #[test]
    fn route_categories_key_on_sequence_number() {
        assert_eq!(Category::StaticRoute.key_field(), "seq-num");
        assert_eq!(Category::PolicyRoute.key_field(), "seq-num");
        assert_eq!(Category::Policy.key_field(), "policyid");
        assert_eq!(Category::ServiceGroup.key_field(), "name");
    }

    #[test]
    fn only_interface_and_zone_need_scoping() {
        let scoped: Vec<_> = Category::ALL
            .into_iter()
            .filter(|c| c.scoped_by_vdom())
            .collect();
        assert_eq!(scoped, vec![Category::Interface, Category::Zone]);
    }
}
