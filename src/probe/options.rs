use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[cfg_attr(feature = "clap", derive(clap::Parser))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct ProbeOptions {
    /// Ceiling on connecting and fetching the device descriptor, defaults to 10s
    #[serde(default = "default_timeout")]
    #[serde(with = "humantime_serde")]
    #[cfg_attr(feature = "clap", arg(long, env, value_parser = DurationValueParser, default_value = "10s"))]
    #[cfg_attr(feature = "schemars", schemars(schema_with = "humantime_duration"))]
    pub timeout: Duration,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
        }
    }
}

#[cfg(feature = "schemars")]
fn humantime_duration(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
    use schemars::schema::*;
    use schemars::JsonSchema;
    use serde_json::json;

    let mut schema: SchemaObject = <String>::json_schema(gen).into();
    schema.metadata = Some(Box::new(Metadata {
        id: None,
        title: None,
        description: Some(r#"A duration in the humantime format. For example: '30s' for 30 seconds. '5m' for 5 minutes."#.to_string()),
        default: None,
        deprecated: false,
        read_only: false,
        write_only: false,
        examples: vec![json!("10s"), json!("1m")],
    }));
    schema.into()
}

#[cfg(feature = "clap")]
#[derive(Clone)]
pub struct DurationValueParser;

#[cfg(feature = "clap")]
impl clap::builder::TypedValueParser for DurationValueParser {
    type Value = Duration;

    fn parse_ref(
        &self,
        cmd: &clap::Command,
        _arg: Option<&clap::Arg>,
        value: &std::ffi::OsStr,
    ) -> Result<Self::Value, clap::Error> {
        use std::str::FromStr;
        Ok(humantime::Duration::from_str(&value.to_string_lossy())
            .map_err(|_err| clap::Error::new(clap::error::ErrorKind::Format).with_cmd(cmd))?
            .into())
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}
