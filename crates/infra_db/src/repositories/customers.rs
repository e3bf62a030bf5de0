//! Customer repository implementation

use sqlx::SqlitePool;

use chrono::{DateTime, NaiveDate, Utc};
use core_kernel::{CustomerId, DigitalToken};
use domain_customer::{AccountStatus, Customer, Gender, Pan, VerificationFlags};

use crate::error::DatabaseError;

/// Flat row shape of the customers table
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: String,
    digital_token: String,
    username: String,
    password_hash: String,
    full_name: String,
    email: String,
    phone: String,
    date_of_birth: NaiveDate,
    age: i64,
    gender: String,
    address: String,
    pan: String,
    face_verified: bool,
    retina_verified: bool,
    profile_photo: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    last_login: Option<DateTime<Utc>>,
}

impl CustomerRow {
    fn into_customer(self) -> Result<Customer, DatabaseError> {
        let id: CustomerId = self.id.parse().map_err(DatabaseError::corrupt)?;
        let token: DigitalToken = self.digital_token.parse().map_err(DatabaseError::corrupt)?;
        let gender: Gender = self.gender.parse().map_err(DatabaseError::corrupt)?;
        let pan: Pan = self.pan.parse().map_err(DatabaseError::corrupt)?;
        let status: AccountStatus = self.status.parse().map_err(DatabaseError::corrupt)?;

        Ok(Customer::from_parts(
            id,
            token,
            self.username,
            self.password_hash,
            self.full_name,
            self.email,
            self.phone,
            self.date_of_birth,
            self.age as u8,
            gender,
            self.address,
            pan,
            VerificationFlags {
                face_verified: self.face_verified,
                retina_verified: self.retina_verified,
            },
            self.profile_photo,
            status,
            self.created_at,
            self.last_login,
        ))
    }
}

/// Repository for the customer aggregate
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a newly registered customer
    ///
    /// Unique indexes on username, email, PAN, and digital token surface
    /// as `DatabaseError::DuplicateEntry`.
    pub async fn insert(&self, customer: &Customer) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO customers (
                id, digital_token, username, password_hash, full_name,
                email, phone, date_of_birth, age, gender, address, pan,
                face_verified, retina_verified, profile_photo, status,
                created_at, last_login
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(customer.id().to_string())
        .bind(customer.digital_token().as_str())
        .bind(customer.username())
        .bind(customer.password_hash())
        .bind(customer.full_name())
        .bind(customer.email())
        .bind(customer.phone())
        .bind(customer.date_of_birth())
        .bind(customer.age() as i64)
        .bind(customer.gender().to_string())
        .bind(customer.address())
        .bind(customer.pan().as_str())
        .bind(customer.verification().face_verified)
        .bind(customer.verification().retina_verified)
        .bind(customer.profile_photo())
        .bind(customer.status().name())
        .bind(customer.created_at())
        .bind(customer.last_login())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Persists the mutable profile fields
    pub async fn update(&self, customer: &Customer) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE customers
            SET face_verified = ?, retina_verified = ?, profile_photo = ?,
                status = ?, last_login = ?
            WHERE id = ?
            "#,
        )
        .bind(customer.verification().face_verified)
        .bind(customer.verification().retina_verified)
        .bind(customer.profile_photo())
        .bind(customer.status().name())
        .bind(customer.last_login())
        .bind(customer.id().to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Customer", customer.id()));
        }
        Ok(())
    }

    pub async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, DatabaseError> {
        let row = sqlx::query_as::<_, CustomerRow>("SELECT * FROM customers WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.map(CustomerRow::into_customer).transpose()
    }

    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Customer>, DatabaseError> {
        let row = sqlx::query_as::<_, CustomerRow>("SELECT * FROM customers WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        row.map(CustomerRow::into_customer).transpose()
    }

    pub async fn find_by_pan(&self, pan: &Pan) -> Result<Option<Customer>, DatabaseError> {
        let row = sqlx::query_as::<_, CustomerRow>("SELECT * FROM customers WHERE pan = ?")
            .bind(pan.as_str())
            .fetch_optional(&self.pool)
            .await?;
        row.map(CustomerRow::into_customer).transpose()
    }
}
