use std::fmt::Display;

use super::escape_string;

/// Which of a network policy's IP lists to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpListKind {
    /// `ALLOWED_IP_LIST`
    Allowed,
    /// `BLOCKED_IP_LIST`
    Blocked,
}

impl Display for IpListKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IpListKind::Allowed => write!(f, "ALLOWED"),
            IpListKind::Blocked => write!(f, "BLOCKED"),
        }
    }
}

/// Builds statements that manage a network policy and where it applies.
#[derive(Debug, Clone, Default)]
pub struct NetworkPolicyBuilder {
    name: String,
    allowed_ip_list: Vec<String>,
    blocked_ip_list: Vec<String>,
    comment: Option<String>,
}

fn ip_list(ips: &[String]) -> String {
    ips.iter()
        .map(|ip| format!("'{}'", escape_string(ip)))
        .collect::<Vec<_>>()
        .join(", ")
}

impl NetworkPolicyBuilder {
    /// Start building statements for the policy `name`.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// IPs allowed by the policy, used by [`Self::create`].
    pub fn with_allowed_ip_list(mut self, ips: Vec<String>) -> Self {
        self.allowed_ip_list = ips;
        self
    }

    /// IPs blocked by the policy, used by [`Self::create`].
    pub fn with_blocked_ip_list(mut self, ips: Vec<String>) -> Self {
        self.blocked_ip_list = ips;
        self
    }

    /// Comment attached on [`Self::create`].
    pub fn with_comment<S: Into<String>>(mut self, comment: S) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn create(&self) -> String {
        let mut q = format!(
            r#"CREATE NETWORK POLICY "{}" ALLOWED_IP_LIST = ({}) BLOCKED_IP_LIST = ({})"#,
            self.name,
            ip_list(&self.allowed_ip_list),
            ip_list(&self.blocked_ip_list)
        );
        if let Some(comment) = &self.comment {
            q.push_str(&format!(" COMMENT = '{}'", escape_string(comment)));
        }
        q
    }

    pub fn drop(&self) -> String {
        format!(r#"DROP NETWORK POLICY "{}""#, self.name)
    }

    pub fn change_comment(&self, comment: &str) -> String {
        format!(
            r#"ALTER NETWORK POLICY "{}" SET COMMENT = '{}'"#,
            self.name,
            escape_string(comment)
        )
    }

    pub fn remove_comment(&self) -> String {
        format!(r#"ALTER NETWORK POLICY "{}" UNSET COMMENT"#, self.name)
    }

    /// Replace one of the policy's IP lists. An empty list renders as `()`.
    pub fn change_ip_list(&self, kind: IpListKind, ips: &[String]) -> String {
        format!(
            r#"ALTER NETWORK POLICY "{}" SET {kind}_IP_LIST = ({})"#,
            self.name,
            ip_list(ips)
        )
    }

    pub fn set_on_account(&self) -> String {
        format!(r#"ALTER ACCOUNT SET NETWORK_POLICY = "{}""#, self.name)
    }

    pub fn unset_on_account(&self) -> String {
        "ALTER ACCOUNT UNSET NETWORK_POLICY".to_owned()
    }

    pub fn set_on_user(&self, user: &str) -> String {
        format!(
            r#"ALTER USER "{user}" SET NETWORK_POLICY = "{}""#,
            self.name
        )
    }

    pub fn unset_on_user(&self, user: &str) -> String {
        format!(r#"ALTER USER "{user}" UNSET NETWORK_POLICY"#)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> NetworkPolicyBuilder {
        NetworkPolicyBuilder::new("test_network_policy")
    }

    #[test]
    fn network_policy_create() {
        let q = policy()
            .with_allowed_ip_list(vec!["192.168.0.100/24".to_owned()])
            .with_blocked_ip_list(vec!["192.168.0.101".to_owned()])
            .with_comment("office only")
            .create();
        assert_eq!(
            q,
            r#"CREATE NETWORK POLICY "test_network_policy" ALLOWED_IP_LIST = ('192.168.0.100/24') BLOCKED_IP_LIST = ('192.168.0.101') COMMENT = 'office only'"#
        );
    }

    #[test]
    fn network_policy_create_without_comment() {
        assert_eq!(
            policy().create(),
            r#"CREATE NETWORK POLICY "test_network_policy" ALLOWED_IP_LIST = () BLOCKED_IP_LIST = ()"#
        );
    }

    #[test]
    fn network_policy_drop() {
        assert_eq!(policy().drop(), r#"DROP NETWORK POLICY "test_network_policy""#);
    }

    #[test]
    fn network_policy_change_comment() {
        assert_eq!(
            policy().change_comment("test comment!"),
            r#"ALTER NETWORK POLICY "test_network_policy" SET COMMENT = 'test comment!'"#
        );
    }

    #[test]
    fn network_policy_remove_comment() {
        assert_eq!(
            policy().remove_comment(),
            r#"ALTER NETWORK POLICY "test_network_policy" UNSET COMMENT"#
        );
    }

    #[test]
    fn network_policy_change_ip_list() {
        let new_allowed_ips = vec!["192.168.0.100/24".to_owned(), "29.254.123.20".to_owned()];
        assert_eq!(
            policy().change_ip_list(IpListKind::Allowed, &new_allowed_ips),
            r#"ALTER NETWORK POLICY "test_network_policy" SET ALLOWED_IP_LIST = ('192.168.0.100/24', '29.254.123.20')"#
        );

        assert_eq!(
            policy().change_ip_list(IpListKind::Blocked, &[]),
            r#"ALTER NETWORK POLICY "test_network_policy" SET BLOCKED_IP_LIST = ()"#
        );
    }

    #[test]
    fn network_policy_ip_lists_are_escaped() {
        let ips = vec!["10.0.0.1') --".to_owned()];
        assert_eq!(
            policy().change_ip_list(IpListKind::Allowed, &ips),
            r#"ALTER NETWORK POLICY "test_network_policy" SET ALLOWED_IP_LIST = ('10.0.0.1\') --')"#
        );
        assert_eq!(
            policy().with_blocked_ip_list(ips).create(),
            r#"CREATE NETWORK POLICY "test_network_policy" ALLOWED_IP_LIST = () BLOCKED_IP_LIST = ('10.0.0.1\') --')"#
        );
    }

    #[test]
    fn network_policy_set_on_account() {
        assert_eq!(
            policy().set_on_account(),
            r#"ALTER ACCOUNT SET NETWORK_POLICY = "test_network_policy""#
        );
    }

    #[test]
    fn network_policy_unset_on_account() {
        assert_eq!(policy().unset_on_account(), "ALTER ACCOUNT UNSET NETWORK_POLICY");
    }

    #[test]
    fn network_policy_set_on_user() {
        assert_eq!(
            policy().set_on_user("testuser"),
            r#"ALTER USER "testuser" SET NETWORK_POLICY = "test_network_policy""#
        );
    }

    #[test]
    fn network_policy_unset_on_user() {
        assert_eq!(
            policy().unset_on_user("testuser"),
            r#"ALTER USER "testuser" UNSET NETWORK_POLICY"#
        );
    }
}
