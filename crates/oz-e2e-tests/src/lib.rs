//! End-to-end tests for the OpsZen log analyzer live under `tests/`.
