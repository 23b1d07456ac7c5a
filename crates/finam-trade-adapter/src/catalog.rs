/*
[INPUT]:  Public client surface
[OUTPUT]: Static listing of resources and their methods
[POS]:    Crate metadata - consumed by the demo binary and docs
[UPDATE]: When a resource method is added, renamed or removed
*/

/// One sub-resource of [`crate::FinamClient`] and its methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceInfo {
    /// Accessor name on the client, e.g. `orders`
    pub name: &'static str,
    pub summary: &'static str,
    pub methods: &'static [&'static str],
}

pub const RESOURCES: &[ResourceInfo] = &[
    ResourceInfo {
        name: "access_tokens",
        summary: "Token management",
        methods: &["set_jwt_token()", "get_jwt_token_details()"],
    },
    ResourceInfo {
        name: "account",
        summary: "Account operations",
        methods: &[
            "get_account_info(account_id)",
            "get_transactions(request)",
            "get_trades(request)",
        ],
    },
    ResourceInfo {
        name: "assets",
        summary: "Asset information",
        methods: &[
            "get_exchanges()",
            "get_assets()",
            "get_clock()",
            "get_options_chain(underlying_symbol)",
            "get_schedule(instrument_symbol)",
            "get_asset(instrument_symbol, account_id)",
            "get_asset_params(instrument_symbol, account_id)",
        ],
    },
    ResourceInfo {
        name: "instruments",
        summary: "Market data",
        methods: &[
            "get_bars(request)",
            "get_last_quote(symbol)",
            "get_last_trades(symbol)",
            "get_order_book(symbol)",
        ],
    },
    ResourceInfo {
        name: "orders",
        summary: "Order management",
        methods: &[
            "place_order(request)",
            "get_order(account_id, order_id)",
            "get_orders(account_id)",
            "cancel_order(account_id, order_id)",
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resources_are_unique_and_ordered() {
        let names: Vec<_> = RESOURCES.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            ["access_tokens", "account", "assets", "instruments", "orders"]
        );
    }

    #[test]
    fn every_resource_lists_methods() {
        for resource in RESOURCES {
            assert!(!resource.methods.is_empty(), "{} has no methods", resource.name);
            for method in resource.methods {
                assert!(method.ends_with(')'), "{method}");
            }
        }
    }
}
