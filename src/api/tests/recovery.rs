use super::*;
use std::io::Cursor;

fn zip_entry_names(bytes: &[u8]) -> Vec<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut names = Vec::new();
    for i in 0..archive.len() {
        names.push(archive.by_index(i).unwrap().name().to_string());
    }
    names.sort();
    names
}

#[tokio::test]
async fn test_recover_with_empty_intake_is_rejected() {
    let (service, carver, _temp_dir) = create_test_service();
    let app = test_router(service);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/recover-file")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "empty_intake");
    assert_eq!(carver.calls(), 0, "carver must not be invoked");
}

#[tokio::test]
async fn test_recover_reports_files_and_download_link() {
    let (service, _carver, _temp_dir) = create_test_service();
    let app = test_router(service);

    app.clone()
        .oneshot(multipart_upload_request("disk.img", b"image-bytes"))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/recover-file")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["downloadLink"], "/download-zip");
    assert_eq!(body["recoveredFiles"][0], "jpg/00000001.jpg");
    assert_eq!(body["recoveredFiles"][1], "png/00000002.png");
}

#[tokio::test]
async fn test_recover_failure_returns_error_with_stderr() {
    let (service, _temp_dir) = create_failing_service("foremost: could not open image");
    let app = test_router(service.clone());

    app.clone()
        .oneshot(multipart_upload_request("disk.img", b"image-bytes"))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/recover-file")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "recovery_failed");
    assert_eq!(
        body["error"]["details"]["stderr"],
        "foremost: could not open image"
    );
    assert!(
        !service.archive_path().exists(),
        "no archive after a failed run"
    );
}

#[tokio::test]
async fn test_end_to_end_upload_recover_download() {
    let (service, _carver, _temp_dir) = create_test_service();
    let app = test_router(service);

    app.clone()
        .oneshot(multipart_upload_request("disk.img", b"image-bytes"))
        .await
        .unwrap();

    let recover = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/recover-file")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(recover.status(), StatusCode::OK);
    let report = body_json(recover).await;

    let download = app
        .oneshot(
            Request::builder()
                .uri("/download-zip")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(download.status(), StatusCode::OK);
    assert_eq!(
        download.headers().get("content-type").unwrap(),
        "application/zip"
    );
    assert_eq!(
        download.headers().get("content-disposition").unwrap(),
        "attachment; filename=\"recovered_files.zip\""
    );

    let bytes = to_bytes(download.into_body(), usize::MAX).await.unwrap();
    let entries = zip_entry_names(&bytes);

    // archive entry set exactly matches the reported listing
    let reported: Vec<String> = report["recoveredFiles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    assert_eq!(entries, reported);
}

#[tokio::test]
async fn test_download_builds_archive_lazily() {
    let (service, _carver, _temp_dir) = create_test_service();
    let app = test_router(service.clone());

    app.clone()
        .oneshot(multipart_upload_request("disk.img", b"image-bytes"))
        .await
        .unwrap();
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/recover-file")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // drop the eagerly built archive; download must rebuild it
    std::fs::remove_file(service.archive_path()).unwrap();

    let download = app
        .oneshot(
            Request::builder()
                .uri("/download-zip")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(download.status(), StatusCode::OK);
    let bytes = to_bytes(download.into_body(), usize::MAX).await.unwrap();
    assert_eq!(
        zip_entry_names(&bytes),
        vec![
            "jpg/00000001.jpg".to_string(),
            "png/00000002.png".to_string()
        ]
    );
}

#[tokio::test]
async fn test_download_with_empty_workspace_serves_empty_archive() {
    let (service, _carver, _temp_dir) = create_test_service();
    let app = test_router(service);

    let download = app
        .oneshot(
            Request::builder()
                .uri("/download-zip")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(download.status(), StatusCode::OK);
    let bytes = to_bytes(download.into_body(), usize::MAX).await.unwrap();
    assert!(zip_entry_names(&bytes).is_empty());
}
