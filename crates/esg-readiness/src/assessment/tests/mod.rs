mod common;
mod recommendation;
mod routing;
