//! Attribute declarations shared by `cloudflare_teams_location` and
//! `cloudflare_zero_trust_dns_location`.

use crate::schema::{Field, Schema};

fn network_schema() -> Schema {
    Schema::new().field(
        "network",
        Field::string()
            .required()
            .describe("The IPv4 or IPv6 address or IP CIDR."),
    )
}

fn ipv4_endpoint_schema() -> Schema {
    Schema::new()
        .field(
            "enabled",
            Field::bool()
                .optional()
                .default(false)
                .describe("Whether the IPv4 DNS endpoint is enabled for this location."),
        )
        .field("authentication_enabled", Field::bool().computed())
}

/// IPv6, DoT and DoH endpoints; `with_token` adds `require_token`.
fn network_endpoint_schema(kind: &'static str, with_token: bool) -> Schema {
    let enabled = match kind {
        "ipv6" => "Whether the IPv6 DNS endpoint is enabled for this location.",
        "dot" => "Whether the DoT endpoint is enabled for this location.",
        _ => "Whether the DoH endpoint is enabled for this location.",
    };
    let schema = Schema::new()
        .field("enabled", Field::bool().optional().default(false).describe(enabled))
        .field("authentication_enabled", Field::bool().computed())
        .field(
            "networks",
            Field::block_list(network_schema())
                .optional()
                .describe("The source networks allowed to query this endpoint."),
        );
    if with_token {
        schema.field(
            "require_token",
            Field::bool()
                .optional()
                .default(false)
                .describe("Whether requests to this endpoint must carry a user token."),
        )
    } else {
        schema
    }
}

fn endpoints_schema() -> Schema {
    Schema::new()
        .field(
            "ipv4",
            Field::block_list(ipv4_endpoint_schema()).required().max_items(1),
        )
        .field(
            "ipv6",
            Field::block_list(network_endpoint_schema("ipv6", false))
                .required()
                .max_items(1),
        )
        .field(
            "dot",
            Field::block_list(network_endpoint_schema("dot", true))
                .required()
                .max_items(1),
        )
        .field(
            "doh",
            Field::block_list(network_endpoint_schema("doh", true))
                .required()
                .max_items(1),
        )
}

pub fn teams_location_schema() -> Schema {
    Schema::new()
        .field(
            "account_id",
            Field::string()
                .required()
                .force_new()
                .describe("The account identifier to target for the resource."),
        )
        .field(
            "name",
            Field::string()
                .required()
                .describe("Name of the teams location."),
        )
        .field(
            "networks",
            Field::block_set(network_schema())
                .optional()
                .describe("The networks CIDRs that comprise the location."),
        )
        .field("ip", Field::string().computed().describe("Client IP address."))
        .field(
            "doh_subdomain",
            Field::string()
                .computed()
                .describe("The FQDN that DoH clients should be pointed at."),
        )
        .field(
            "anonymized_logs_enabled",
            Field::bool()
                .computed()
                .describe("Indicator that anonymized logs are enabled."),
        )
        .field(
            "ipv4_destination",
            Field::string()
                .computed()
                .describe("IP to direct all IPv4 DNS queries to."),
        )
        .field(
            "ipv4_destination_backup",
            Field::string()
                .computed()
                .describe("Backup IP to direct all IPv4 DNS queries to."),
        )
        .field(
            "client_default",
            Field::bool()
                .optional()
                .default(false)
                .describe("Indicator that this is the default location."),
        )
        .field(
            "ecs_support",
            Field::bool()
                .optional()
                .default(false)
                .describe("Indicator that this location needs to resolve EDNS queries."),
        )
        .field(
            "dns_destination_ipv6_block_id",
            Field::string()
                .optional_computed()
                .describe("IPv6 block binded to the DNS location."),
        )
        .field(
            "dns_destination_ips_id",
            Field::string()
                .optional_computed()
                .describe("IPv4 binding assigned to the DNS location."),
        )
        .field(
            "endpoints",
            Field::block_list(endpoints_schema())
                .optional_computed()
                .max_items(1)
                .describe("Endpoints assigned to the DNS location."),
        )
}
