use section_map::{quote_value, Command};

/// Table every route falls back to when no policy applies.
pub const MAIN_TABLE: &str = "main";

pub const DEFAULT_DST: &str = "0.0.0.0/0";

/// One `/ip route` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub dst: String,
    pub gateway: String,
    pub table: String,
    pub distance: Option<u32>,
    pub scope: Option<u32>,
    pub target_scope: Option<u32>,
    pub check_gateway: bool,
    pub comment: Option<String>,
}

impl Route {
    pub fn new(dst: impl Into<String>, gateway: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            dst: dst.into(),
            gateway: gateway.into(),
            table: table.into(),
            distance: None,
            scope: None,
            target_scope: None,
            check_gateway: false,
            comment: None,
        }
    }

    /// `0.0.0.0/0` via `gateway` in `table`.
    pub fn default_via(gateway: impl Into<String>, table: impl Into<String>) -> Self {
        Self::new(DEFAULT_DST, gateway, table)
    }

    /// `/32` host route, used to pin failover probe hosts to one link.
    pub fn host(host: &str, gateway: impl Into<String>, table: impl Into<String>) -> Self {
        Self::new(format!("{host}/32"), gateway, table)
    }

    pub fn distance(mut self, distance: u32) -> Self {
        self.distance = Some(distance);
        self
    }

    pub fn scope(mut self, scope: u32) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn target_scope(mut self, scope: u32) -> Self {
        self.target_scope = Some(scope);
        self
    }

    pub fn check_gateway(mut self) -> Self {
        self.check_gateway = true;
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn is_default(&self) -> bool {
        self.dst == DEFAULT_DST
    }

    /// Same route in another table; nothing else changes.
    pub fn in_table(&self, table: &str) -> Route {
        Route {
            table: table.to_string(),
            ..self.clone()
        }
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::add()
            .arg("dst-address", &self.dst)
            .arg("gateway", &self.gateway)
            .arg_opt("distance", self.distance)
            .arg_opt("scope", self.scope)
            .arg_opt("target-scope", self.target_scope);
        if self.check_gateway {
            cmd = cmd.raw("check-gateway", "ping");
        }
        cmd.arg("routing-table", &self.table)
            .arg_opt("comment", self.comment.as_deref())
    }
}

/// Render routes, then copies of the routes living in `dedicated` moved to `main`.
///
/// Copies are only produced when `into_main` is set, which is the case when
/// the router has no domestic uplink to own the main table.
pub fn with_main_duplicates(routes: &[Route], dedicated: &str, into_main: bool) -> Vec<String> {
    let mut lines: Vec<String> = routes.iter().map(|r| r.command().to_string()).collect();
    if into_main {
        lines.extend(
            routes
                .iter()
                .filter(|r| r.table == dedicated)
                .map(|r| r.in_table(MAIN_TABLE).command().to_string()),
        );
    }
    lines
}

/// `/routing table add` line.
pub fn declare_table(name: &str) -> String {
    format!("add name={} fib", quote_value(name))
}

#[cfg(test)]
mod tests {
    use super::{declare_table, with_main_duplicates, Route};

    #[test]
    fn renders_recursive_default_route() {
        let route = Route::default_via("1.1.1.1", "to-VPN")
            .distance(1)
            .check_gateway()
            .target_scope(11);
        assert_eq!(
            route.command().to_string(),
            "add dst-address=0.0.0.0/0 gateway=1.1.1.1 distance=1 target-scope=11 check-gateway=ping routing-table=to-VPN"
        );
    }

    #[test]
    fn duplicates_only_dedicated_table_routes() {
        let routes = [
            Route::default_via("wg-client", "to-VPN").distance(1),
            Route::default_via("ether1", "to-ether1").distance(10),
        ];
        let lines = with_main_duplicates(&routes, "to-VPN", true);
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[2],
            "add dst-address=0.0.0.0/0 gateway=wg-client distance=1 routing-table=main"
        );

        assert_eq!(with_main_duplicates(&routes, "to-VPN", false).len(), 2);
    }

    #[test]
    fn table_declaration() {
        assert_eq!(declare_table("to-Foreign"), "add name=to-Foreign fib");
    }
}
