//! Meta tests enforcing repository structure conventions

mod coverage;
