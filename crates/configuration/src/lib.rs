pub mod chart;
pub mod configuration;
pub mod connection_settings;
pub mod document;
pub mod environment;
pub mod error;
pub mod filter;
pub mod validation;
pub mod values;

pub use chart::{
    AxisSpec, ChartKind, ChartOptions, ChartSpec, JoinSpec, OrderDirection, OrderSpec, TableSpec,
};
pub use configuration::{make_runtime_configuration, Configuration};
pub use connection_settings::{read_connection_settings, DatabaseConnectionSettings};
pub use document::{
    chart_config_schema, chart_config_to_string, parse_chart_config, parse_chart_configs,
    read_chart_config, read_chart_configs, read_chart_document, write_chart_config,
    write_chart_config_schema,
};
pub use filter::{FilterSpec, FilterValue, Operator, PredicateFilter, RawFilter, Scalar};
pub use validation::{normalize, validate, validate_and_normalize, ValidationError};
pub use values::ConnectionUri;
