use std::collections::BTreeMap;

/// One firewall rule: free-form key/value pairs (e.g. `protocol`, `destination`, `ports`).
pub type SecurityGroupRule = BTreeMap<String, String>;

/// An application security group.
///
/// `guid` is empty until the group has been created or fetched. A group read
/// from the server never carries `space_guids`; the field is only sent on create.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationSecurityGroupFields {
    pub name: String,
    pub guid: String,
    pub rules: Vec<SecurityGroupRule>,
    pub space_guids: Vec<String>,
}

impl ApplicationSecurityGroupFields {
    /// A new, not yet created group.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Append a rule built from key/value pairs.
    #[must_use]
    pub fn with_rule<K, V>(mut self, rule: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.rules
            .push(rule.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    /// Append a space the group is bound to on create.
    #[must_use]
    pub fn with_space(mut self, space_guid: impl Into<String>) -> Self {
        self.space_guids.push(space_guid.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_preserves_order() {
        let group = ApplicationSecurityGroupFields::new("web")
            .with_rule([("protocol", "tcp"), ("ports", "443")])
            .with_rule([("protocol", "udp")])
            .with_space("space-b")
            .with_space("space-a");

        assert_eq!(group.name, "web");
        assert!(group.guid.is_empty());
        assert_eq!(group.rules.len(), 2);
        assert_eq!(group.rules[0]["ports"], "443");
        assert_eq!(group.rules[1]["protocol"], "udp");
        assert_eq!(group.space_guids, ["space-b", "space-a"]);
    }
}
