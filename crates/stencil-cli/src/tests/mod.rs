//! Test suites for the stencil CLI runtime.

mod support;
