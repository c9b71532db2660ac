use recordform::record::RecordModel;

#[derive(Clone, recordform::RecordModel)]
struct DemoRecord {
    display_name: String,
}

fn main() {
    let fields = DemoRecord::fields();
    assert_eq!(fields.display_name().as_str(), "displayName");

    let record = DemoRecord {
        display_name: "a".to_string(),
    };
    let payload = record.to_payload();
    let decoded = DemoRecord::from_payload(&payload).expect("payload must decode");
    assert_eq!(decoded.display_name, "a");
}
