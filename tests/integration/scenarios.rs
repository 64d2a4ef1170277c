use crate::*;

/// Register, lookup hit, lookup miss, rejected re-register, list — in order
/// against one server.
#[tokio::test]
async fn test_phone_walkthrough() -> Result<()> {
    let server = spawn_server().await?;

    // register
    let (status, body) = server.post("/register/phone1", r#"{"ip":"10.0.0.5"}"#).await?;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        serde_json::json!({"status": "success", "device_id": "phone1", "ip": "10.0.0.5"})
    );

    // lookup hit
    let (status, body) = server.get("/lookup/phone1").await?;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "success");
    assert_eq!(body["device_id"], "phone1");
    assert_eq!(body["ip"], "10.0.0.5");
    assert!(body["last_seen"].is_u64(), "last_seen not an integer: {body}");
    let last_seen = body["last_seen"].clone();

    // lookup miss
    let (status, body) = server.get("/lookup/unknown").await?;
    assert_eq!(status, 404);
    assert_eq!(
        body,
        serde_json::json!({"status": "error", "error": "Device not found"})
    );

    // register without ip
    let (status, body) = server.post("/register/phone1", "{}").await?;
    assert_eq!(status, 400);
    assert_eq!(body, serde_json::json!({"error": "IP address required"}));

    let (_, body) = server.get("/lookup/phone1").await?;
    assert_eq!(body["ip"], "10.0.0.5");
    assert_eq!(body["last_seen"], last_seen);

    // list
    let (status, body) = server.get("/devices").await?;
    assert_eq!(status, 200);
    assert_eq!(body["total"], 1);
    let devices = body["devices"].as_array().context("no devices array")?;
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0]["id"], "phone1");
    assert_eq!(devices[0]["ip"], "10.0.0.5");
    assert_eq!(devices[0]["last_seen"], last_seen);

    Ok(())
}
