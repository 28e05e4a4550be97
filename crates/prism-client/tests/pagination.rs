use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use prism_api::{ListMetadata, ListingRequest, ListingResponse, ResourceKind};
use prism_client::{ClientError, ListingTransport, PAGE_SIZE, aggregate, fetch_all};

/// In-memory listing API
#[derive(Default)]
struct MockPrism {
    records: HashMap<ResourceKind, Vec<Value>>,
    omit_length: HashSet<ResourceKind>,
    omit_total: HashSet<ResourceKind>,
    reported_length: HashMap<ResourceKind, u64>,
    reported_total: HashMap<ResourceKind, u64>,
    fail_at: HashMap<ResourceKind, u64>,
    hang: HashSet<ResourceKind>,
    requests: Mutex<Vec<ListingRequest>>,
}

impl MockPrism {
    fn with_records(mut self, kind: ResourceKind, count: usize) -> Self {
        let records = (0..count)
            .map(|i| json!({"spec": {"name": format!("{kind}-{i}")}}))
            .collect();
        self.records.insert(kind, records);
        self
    }

    fn without_length(mut self, kind: ResourceKind) -> Self {
        self.omit_length.insert(kind);
        self
    }

    fn without_total(mut self, kind: ResourceKind) -> Self {
        self.omit_total.insert(kind);
        self
    }

    /// Report `length` in every page's metadata regardless of its entities
    fn reporting_length(mut self, kind: ResourceKind, length: u64) -> Self {
        self.reported_length.insert(kind, length);
        self
    }

    /// Report `total` as `total_matches` regardless of the stored records
    fn reporting_total(mut self, kind: ResourceKind, total: u64) -> Self {
        self.reported_total.insert(kind, total);
        self
    }

    fn failing_at(mut self, kind: ResourceKind, offset: u64) -> Self {
        self.fail_at.insert(kind, offset);
        self
    }

    fn hanging(mut self, kind: ResourceKind) -> Self {
        self.hang.insert(kind);
        self
    }

    fn requests_for(&self, kind: ResourceKind) -> Vec<ListingRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.kind == kind)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ListingTransport for MockPrism {
    async fn list(&self, request: &ListingRequest) -> prism_client::Result<ListingResponse> {
        self.requests.lock().unwrap().push(request.clone());

        if self.hang.contains(&request.kind) {
            std::future::pending::<()>().await;
        }

        if self.fail_at.get(&request.kind) == Some(&request.offset) {
            return Err(ClientError::Api {
                status: 500,
                message: "INTERNAL_ERROR".to_string(),
            });
        }

        let all = self.records.get(&request.kind).cloned().unwrap_or_default();
        let start = usize::try_from(request.offset).unwrap().min(all.len());
        let end = (start + usize::try_from(request.length).unwrap()).min(all.len());
        let entities: Vec<Value> = all[start..end].to_vec();

        let length = if self.omit_length.contains(&request.kind) {
            None
        } else {
            let actual = entities.len() as u64;
            Some(*self.reported_length.get(&request.kind).unwrap_or(&actual))
        };

        let total_matches = if self.omit_total.contains(&request.kind) {
            None
        } else {
            let actual = all.len() as u64;
            Some(*self.reported_total.get(&request.kind).unwrap_or(&actual))
        };

        Ok(ListingResponse {
            entities,
            metadata: ListMetadata {
                length,
                total_matches,
            },
        })
    }
}

fn names(records: &[Value]) -> Vec<String> {
    records
        .iter()
        .map(|r| r["spec"]["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_drains_all_pages_in_order() {
    let mock = MockPrism::default().with_records(ResourceKind::Vm, 123);

    let vms = fetch_all(&mock, ResourceKind::Vm, None).await.unwrap();

    assert_eq!(vms.len(), 123);
    let expected: Vec<String> = (0..123).map(|i| format!("vms-{i}")).collect();
    assert_eq!(names(&vms), expected);

    let requests = mock.requests_for(ResourceKind::Vm);
    assert_eq!(requests.len(), 3);
    let offsets: Vec<u64> = requests.iter().map(|r| r.offset).collect();
    assert_eq!(offsets, vec![0, 50, 100]);
    assert!(requests.iter().all(|r| r.length == PAGE_SIZE));
}

#[tokio::test]
async fn test_exact_page_multiple() {
    let mock = MockPrism::default().with_records(ResourceKind::Cluster, 100);

    let clusters = fetch_all(&mock, ResourceKind::Cluster, None).await.unwrap();

    assert_eq!(clusters.len(), 100);
    assert_eq!(mock.requests_for(ResourceKind::Cluster).len(), 2);
}

#[tokio::test]
async fn test_empty_collection_issues_one_request() {
    let mock = MockPrism::default().with_records(ResourceKind::Project, 0);

    let projects = fetch_all(&mock, ResourceKind::Project, None).await.unwrap();

    assert!(projects.is_empty());
    assert_eq!(mock.requests_for(ResourceKind::Project).len(), 1);
}

#[tokio::test]
async fn test_missing_length_stops_after_first_page() {
    let mock = MockPrism::default()
        .with_records(ResourceKind::OsTypeCategory, 75)
        .without_length(ResourceKind::OsTypeCategory);

    let os_types = fetch_all(&mock, ResourceKind::OsTypeCategory, None)
        .await
        .unwrap();

    assert_eq!(os_types.len(), 50);
    assert_eq!(mock.requests_for(ResourceKind::OsTypeCategory).len(), 1);
}

#[tokio::test]
async fn test_request_carries_kind_filter() {
    let mock = MockPrism::default().with_records(ResourceKind::OsTypeCategory, 1);

    fetch_all(&mock, ResourceKind::OsTypeCategory, None)
        .await
        .unwrap();

    let request = &mock.requests_for(ResourceKind::OsTypeCategory)[0];
    let payload = serde_json::to_value(request).unwrap();
    assert_eq!(
        payload,
        json!({"kind": "category", "offset": 0, "length": 50})
    );
}

#[tokio::test]
async fn test_error_on_later_page_aborts() {
    let mock = MockPrism::default()
        .with_records(ResourceKind::Vm, 120)
        .failing_at(ResourceKind::Vm, 50);

    let result = fetch_all(&mock, ResourceKind::Vm, None).await;

    assert!(matches!(result, Err(ClientError::Api { status: 500, .. })));
    assert_eq!(mock.requests_for(ResourceKind::Vm).len(), 2);
}

#[tokio::test]
async fn test_length_without_total_is_invalid() {
    let mock = MockPrism::default()
        .with_records(ResourceKind::Project, 10)
        .without_total(ResourceKind::Project);

    let result = fetch_all(&mock, ResourceKind::Project, None).await;

    assert!(matches!(result, Err(ClientError::InvalidResponse(_))));
    assert_eq!(mock.requests_for(ResourceKind::Project).len(), 1);
}

#[tokio::test]
async fn test_empty_page_before_total_stops() {
    let mock = MockPrism::default()
        .with_records(ResourceKind::Vm, 50)
        .reporting_total(ResourceKind::Vm, 200);

    let vms = fetch_all(&mock, ResourceKind::Vm, None).await.unwrap();

    assert_eq!(vms.len(), 50);
    let offsets: Vec<u64> = mock
        .requests_for(ResourceKind::Vm)
        .iter()
        .map(|r| r.offset)
        .collect();
    assert_eq!(offsets, vec![0, 50]);
}

#[tokio::test]
async fn test_out_of_range_length_is_invalid() {
    let mock = MockPrism::default()
        .with_records(ResourceKind::Vm, 1)
        .reporting_length(ResourceKind::Vm, u64::MAX - 10)
        .reporting_total(ResourceKind::Vm, u64::MAX);

    let result = fetch_all(&mock, ResourceKind::Vm, None).await;

    assert!(matches!(result, Err(ClientError::InvalidResponse(_))));
    assert_eq!(mock.requests_for(ResourceKind::Vm).len(), 2);
}

#[tokio::test]
async fn test_aggregate_collects_every_kind() {
    let mock = MockPrism::default()
        .with_records(ResourceKind::Vm, 60)
        .with_records(ResourceKind::Cluster, 2)
        .with_records(ResourceKind::Project, 3)
        .with_records(ResourceKind::OsTypeCategory, 4);

    let resources = aggregate(&mock).await.unwrap();

    assert_eq!(resources.vms.len(), 60);
    assert_eq!(resources.clusters.len(), 2);
    assert_eq!(resources.projects.len(), 3);
    assert_eq!(resources.os_types.len(), 4);
}

#[tokio::test]
async fn test_aggregate_fails_fast() {
    let mock = MockPrism::default()
        .with_records(ResourceKind::Cluster, 2)
        .with_records(ResourceKind::Project, 3)
        .hanging(ResourceKind::Vm)
        .failing_at(ResourceKind::OsTypeCategory, 0);

    let result = tokio::time::timeout(Duration::from_secs(5), aggregate(&mock))
        .await
        .expect("aggregate should not wait for the hanging drain");

    assert!(result.is_err());
}
