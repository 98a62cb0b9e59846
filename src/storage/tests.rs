use std::str::FromStr;

use teloxide::types::ChatId;

use super::{
    ApplicationEntity, ApplicationStatus, CustomerEntity, RecordKind, RecordStorage,
    sqlite::SqliteStorage,
};

async fn create_in_memory_storage() -> SqliteStorage {
    SqliteStorage::new("sqlite::memory:").await.unwrap()
}

fn customer(line: &str) -> CustomerEntity {
    CustomerEntity::from_str(line).unwrap()
}

fn application(line: &str) -> ApplicationEntity {
    ApplicationEntity::from_str(line).unwrap()
}

#[tokio::test]
async fn test_add_and_get_customer() {
    let storage = create_in_memory_storage().await;
    let chat_id = ChatId(1);
    let new_customer = customer("Μαρία Κωνσταντίνου; 123456789; 6971234567; maria@example.gr; Πάτρα");

    let result = storage.add_customer(chat_id, new_customer.clone()).await.unwrap();

    assert!(result);

    let customers = storage.get_customers(chat_id).await.unwrap();
    assert_eq!(customers.len(), 1);
    assert!(customers[0].id > 0);
    assert_eq!(customers[0], CustomerEntity { id: customers[0].id, ..new_customer });
}

#[tokio::test]
async fn test_add_same_customer() {
    let storage = create_in_memory_storage().await;
    let chat_id = ChatId(1);

    let result =
        storage.add_customer(chat_id, customer("Νίκος Αλεξίου; 111111111; 2101234567")).await;
    assert!(result.unwrap());

    // Same tax id for the same agent is a duplicate
    let result =
        storage.add_customer(chat_id, customer("Ν. Αλεξίου; 111111111; 6900000000")).await;
    assert!(!result.unwrap());

    // Another agent may hold the same customer
    let result =
        storage.add_customer(ChatId(2), customer("Νίκος Αλεξίου; 111111111; 2101234567")).await;
    assert!(result.unwrap());

    assert_eq!(storage.count_records(chat_id, RecordKind::Customers).await.unwrap(), 1);
}

#[tokio::test]
async fn test_customers_are_ordered_by_name() {
    let storage = create_in_memory_storage().await;
    let chat_id = ChatId(1);

    for line in [
        "Χρήστος Ζαφειρίου; 333333333; 2101111111",
        "Άννα Βλάχου; 111111111; 2102222222",
        "Γιώργος Δήμου; 222222222; 2103333333",
    ] {
        storage.add_customer(chat_id, customer(line)).await.unwrap();
    }

    let names: Vec<String> = storage
        .get_customers(chat_id)
        .await
        .unwrap()
        .into_iter()
        .map(|customer| customer.full_name)
        .collect();

    assert_eq!(names, vec!["Άννα Βλάχου", "Γιώργος Δήμου", "Χρήστος Ζαφειρίου"]);
}

#[tokio::test]
async fn test_add_and_get_application() {
    let storage = create_in_memory_storage().await;
    let chat_id = ChatId(1);
    let new_application =
        application("Μαρία Κωνσταντίνου; 123456789; Ευρωπαϊκή Πίστη; Υγεία Plus; 85,50; 14/03/2025; paid");

    assert!(storage.add_application(chat_id, new_application.clone()).await.unwrap());

    let applications = storage.get_applications(chat_id).await.unwrap();
    assert_eq!(applications.len(), 1);

    let stored = storage.get_application(chat_id, applications[0].id).await.unwrap().unwrap();
    assert_eq!(stored, ApplicationEntity { id: stored.id, ..new_application });
    assert_eq!(stored.status, ApplicationStatus::Paid);
    assert_eq!(stored.commission_cents, 8550);
}

#[tokio::test]
async fn test_applications_are_newest_first() {
    let storage = create_in_memory_storage().await;
    let chat_id = ChatId(1);

    for line in [
        "Α; 111111111; Interamerican; Αυτοκίνητο; 20; 01/02/2025",
        "Β; 222222222; Interamerican; Κατοικία; 30; 15/06/2025",
        "Γ; 333333333; Interamerican; Ζωή; 40; 10/04/2025",
    ] {
        storage.add_application(chat_id, application(line)).await.unwrap();
    }

    let names: Vec<String> = storage
        .get_applications(chat_id)
        .await
        .unwrap()
        .into_iter()
        .map(|application| application.customer_name)
        .collect();

    assert_eq!(names, vec!["Β", "Γ", "Α"]);
}

#[tokio::test]
async fn test_remove_records() {
    let storage = create_in_memory_storage().await;
    let chat_id = ChatId(1);

    storage.add_customer(chat_id, customer("Νίκος; 111111111; 2101234567")).await.unwrap();
    storage
        .add_application(chat_id, application("Νίκος; 111111111; Generali; Ζωή; 10; 01/01/2025"))
        .await
        .unwrap();

    let customer_id = storage.get_customers(chat_id).await.unwrap()[0].id;
    let application_id = storage.get_applications(chat_id).await.unwrap()[0].id;

    // Records of one agent are invisible to another
    assert!(!storage.remove_customer(ChatId(2), customer_id).await.unwrap());
    assert!(storage.get_customer(ChatId(2), customer_id).await.unwrap().is_none());

    assert!(storage.remove_customer(chat_id, customer_id).await.unwrap());
    assert!(storage.remove_application(chat_id, application_id).await.unwrap());
    assert!(!storage.remove_application(chat_id, application_id).await.unwrap());

    assert!(storage.get_customer(chat_id, customer_id).await.unwrap().is_none());
    assert_eq!(storage.count_records(chat_id, RecordKind::Applications).await.unwrap(), 0);
}

#[tokio::test]
async fn test_empty_agent_has_no_records() {
    let storage = create_in_memory_storage().await;

    assert!(storage.get_customers(ChatId(42)).await.unwrap().is_empty());
    assert!(storage.get_applications(ChatId(42)).await.unwrap().is_empty());
    assert_eq!(storage.count_records(ChatId(42), RecordKind::Customers).await.unwrap(), 0);
}

