use log::LevelFilter;

fn setup_logging() -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}: {}", record.level(), record.target(), message))
        })
        .level(LevelFilter::Debug)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}

fn main() {
    setup_logging().unwrap();

    let yaml = r#"
apiVersion: v1
kind: Namespace
metadata:
    name: prod
---
# Not a manifest, will be skipped with a warning
replicas: 3
---
apiVersion: apps/v1
kind: Deployment
metadata:
    name: web
    namespace: prod
spec:
    replicas: 3
    template:
        spec:
            containers:
                - name: web
                  image: nginx:1.25
                  resources:
                      limits:
                          cpu: "0.25"
"#;

    let decoded = yaml_manifest::decode_multi(yaml).unwrap();
    for manifest in &decoded.manifests {
        println!(
            "{} {}",
            manifest.manifest_kind().unwrap_or("?"),
            manifest.name().unwrap_or("?")
        );
    }
    for warning in &decoded.warnings {
        println!("document {} skipped: {}", warning.index, warning.error);
    }

    println!("{}", yaml_manifest::encode(&decoded.manifests).unwrap());
}
