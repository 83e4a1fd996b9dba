mod macros;
mod router;

pub use macros::{
    // Internal functions used by macros (hidden from docs)
    __any_impl, __delete_impl, __get_impl, __post_impl, __put_impl, validate_route_path,
    GroupDef, GroupRoute, RouteDefBuilder,
};
pub use router::{
    route, BoxedHandler, HttpMethod, RouteBuilder, RouteInfo, RouteMatch,
    Router,
};
