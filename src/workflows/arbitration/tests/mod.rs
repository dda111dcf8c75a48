mod common;

mod allocation;
mod delay;
mod routing;
