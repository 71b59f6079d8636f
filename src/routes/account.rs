use actix_web::{web, HttpResponse, Responder};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::error::WriteError;
use mongodb::Client;
use std::sync::Arc;

use crate::middleware::auth::Claims;
use crate::models::user::{AuthResponse, SigninRequest, SignupRequest, User, UserPublic};

const DB_NAME: &str = "WeekendWanderer";
const USERS_COLLECTION: &str = "Users";

fn users_collection(client: &Client) -> mongodb::Collection<User> {
    client.database(DB_NAME).collection(USERS_COLLECTION)
}

pub async fn signup(
    data: web::Data<Arc<Client>>,
    input: web::Json<SignupRequest>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = users_collection(&client);

    let input = input.into_inner();

    if input.name.trim().is_empty() || input.email.trim().is_empty() || input.password.is_empty() {
        return HttpResponse::BadRequest().json(AuthResponse::failure("All fields are required"));
    }
    if !is_valid_email(&input.email) {
        return HttpResponse::BadRequest().json(AuthResponse::failure("Invalid email address"));
    }

    let hashed = match bcrypt::hash(&input.password, bcrypt::DEFAULT_COST) {
        Ok(hashed) => hashed,
        Err(err) => {
            log::error!("Failed to hash password: {:?}", err);
            return HttpResponse::InternalServerError()
                .json(AuthResponse::failure("Failed to create account"));
        }
    };

    let curr_time = Utc::now();
    let user = User {
        id: None,
        name: input.name,
        email: input.email,
        password: hashed,
        last_signin: None,
        failed_signins: None,
        created_at: Some(curr_time),
        updated_at: Some(curr_time),
    };

    match collection.insert_one(&user).await {
        Ok(result) => {
            let user_id = match result.inserted_id.as_object_id() {
                Some(id) => id,
                None => {
                    return HttpResponse::InternalServerError()
                        .json(AuthResponse::failure("Failed to create account"))
                }
            };

            match generate_token(&user.email, user_id) {
                Ok(token) => HttpResponse::Created().json(AuthResponse {
                    success: true,
                    user: Some(UserPublic {
                        id: user_id.to_hex(),
                        name: user.name,
                        email: user.email,
                        created_at: curr_time,
                    }),
                    token: Some(token),
                    message: Some("Account created successfully".to_string()),
                }),
                Err(_) => HttpResponse::InternalServerError()
                    .json(AuthResponse::failure("Token generation failed")),
            }
        }
        Err(err) => match *err.kind {
            mongodb::error::ErrorKind::Write(error_info) => match error_info {
                mongodb::error::WriteFailure::WriteError(WriteError { code, .. }) => {
                    if code == 11000 {
                        HttpResponse::Conflict().json(AuthResponse::failure(
                            "User with this email already exists",
                        ))
                    } else {
                        log::error!("Write error code: {}", code);
                        HttpResponse::InternalServerError()
                            .json(AuthResponse::failure("Failed to create account"))
                    }
                }
                _ => HttpResponse::InternalServerError()
                    .json(AuthResponse::failure("Failed to create account")),
            },
            _ => HttpResponse::InternalServerError()
                .json(AuthResponse::failure("Failed to create account")),
        },
    }
}

pub async fn signin(
    data: web::Data<Arc<Client>>,
    input: web::Json<SigninRequest>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = users_collection(&client);

    let input = input.into_inner();

    if input.email.trim().is_empty() || input.password.is_empty() {
        return HttpResponse::BadRequest()
            .json(AuthResponse::failure("Email and password are required"));
    }

    let filter = doc! { "email": &input.email };

    match collection.find_one(filter).await {
        Ok(Some(user)) => {
            if bcrypt::verify(&input.password, &user.password).unwrap_or(false) {
                let update = doc! {
                    "$set": {
                        "last_signin": Utc::now().to_rfc3339(),
                        "failed_signins": 0
                    }
                };

                if let Err(err) = collection
                    .update_one(doc! { "email": &input.email }, update)
                    .await
                {
                    log::error!("Failed to update signin metadata: {:?}", err);
                    return HttpResponse::InternalServerError()
                        .json(AuthResponse::failure("Failed to sign in"));
                }

                let user_id = match user.id {
                    Some(id) => id,
                    None => {
                        return HttpResponse::InternalServerError()
                            .json(AuthResponse::failure("Failed to sign in"))
                    }
                };

                match generate_token(&user.email, user_id) {
                    Ok(token) => HttpResponse::Ok().json(AuthResponse {
                        success: true,
                        user: Some(UserPublic {
                            id: user_id.to_hex(),
                            name: user.name,
                            email: user.email,
                            created_at: user.created_at.unwrap_or_default(),
                        }),
                        token: Some(token),
                        message: Some("Login successful".to_string()),
                    }),
                    Err(_) => HttpResponse::InternalServerError()
                        .json(AuthResponse::failure("Token generation failed")),
                }
            } else {
                let failed_signins = user.failed_signins.unwrap_or(0) + 1;
                let update = doc! {
                    "$set": { "failed_signins": failed_signins }
                };

                match collection
                    .update_one(doc! { "email": &input.email }, update)
                    .await
                {
                    Ok(_) => HttpResponse::Unauthorized()
                        .json(AuthResponse::failure("Invalid email or password")),
                    Err(err) => {
                        log::error!("Failed to update failed signins: {:?}", err);
                        HttpResponse::InternalServerError()
                            .json(AuthResponse::failure("Failed to process signin"))
                    }
                }
            }
        }
        // Same message as a bad password so the response does not leak which
        // emails have accounts.
        Ok(None) => {
            HttpResponse::Unauthorized().json(AuthResponse::failure("Invalid email or password"))
        }
        Err(err) => {
            log::error!("Database error: {:?}", err);
            HttpResponse::InternalServerError()
                .json(AuthResponse::failure("Failed to process signin"))
        }
    }
}

pub async fn user_session(
    claims: web::ReqData<Claims>,
    data: web::Data<Arc<Client>>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = users_collection(&client);

    let user_id = match ObjectId::parse_str(&claims.user_id) {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().json(AuthResponse::failure("Invalid user ID"))
        }
    };

    match collection.find_one(doc! { "_id": user_id }).await {
        Ok(Some(user)) => HttpResponse::Ok().json(AuthResponse {
            success: true,
            user: Some(UserPublic {
                id: user_id.to_hex(),
                name: user.name,
                email: user.email,
                created_at: user.created_at.unwrap_or_default(),
            }),
            token: None,
            message: None,
        }),
        Ok(None) => HttpResponse::NotFound().json(AuthResponse::failure("User not found")),
        Err(err) => {
            log::error!("Failed to fetch user: {:?}", err);
            HttpResponse::InternalServerError().json(AuthResponse::failure("Failed to fetch user"))
        }
    }
}

fn is_valid_email(email: &str) -> bool {
    let re = regex::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?)*$",
    );
    re.unwrap().is_match(email)
}

fn generate_token(email: &str, user_id: ObjectId) -> Result<String, jsonwebtoken::errors::Error> {
    let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    let now = Utc::now();

    let claims = Claims {
        sub: email.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::hours(24)).timestamp() as usize,
        user_id: user_id.to_hex(),
    };

    let header = Header::new(Algorithm::HS256);
    encode(&header, &claims, &EncodingKey::from_secret(secret.as_ref()))
}
