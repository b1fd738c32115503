use diesel::result;

/// Failures of the cart-to-order transaction. Every variant except a
/// successful commit leaves the store untouched.
#[derive(Debug, PartialEq)]
pub enum CheckoutError {
    MissingAddress,
    EmptyCart,
    /// Carries the title of the product that is no longer purchasable.
    ProductUnavailable(String),
    PersistenceFailure,
}

impl std::error::Error for CheckoutError {}

impl std::fmt::Display for CheckoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckoutError::MissingAddress => write!(f, "Address is required"),
            CheckoutError::EmptyCart => write!(f, "Cart is empty!"),
            CheckoutError::ProductUnavailable(title) => {
                write!(f, "Sorry, \"{}\" has just been sold to someone else!", title)
            }
            CheckoutError::PersistenceFailure => write!(f, "Order could not be saved"),
        }
    }
}

impl From<result::Error> for CheckoutError {
    fn from(_: result::Error) -> Self {
        CheckoutError::PersistenceFailure
    }
}

#[derive(Debug, PartialEq)]
pub enum OrderServiceError {
    OrderNotFound,
    InvalidStatusTransition,
    DatabaseError,
}

impl std::error::Error for OrderServiceError {}

impl std::fmt::Display for OrderServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderServiceError::OrderNotFound => write!(f, "Order not found"),
            OrderServiceError::InvalidStatusTransition => {
                write!(f, "Invalid status transition")
            }
            OrderServiceError::DatabaseError => write!(f, "Database error"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum ProductServiceError {
    ProductNotFound,
    NotListingOwner,
    /// The listing is sold (or rejected) and can no longer be changed.
    ListingUnavailable,
    ProductCreationFailed,
    DatabaseError,
}

impl std::error::Error for ProductServiceError {}

impl std::fmt::Display for ProductServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductServiceError::ProductNotFound => write!(f, "Product not found"),
            ProductServiceError::NotListingOwner => {
                write!(f, "Only the seller may change this listing")
            }
            ProductServiceError::ListingUnavailable => {
                write!(f, "This listing can no longer be changed")
            }
            ProductServiceError::ProductCreationFailed => {
                write!(f, "Product creation failed")
            }
            ProductServiceError::DatabaseError => write!(f, "Database error"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum CartServiceError {
    ProductNotFound,
    /// Only active listings may enter a cart.
    ProductUnavailable(String),
    InvalidQuantity,
    ItemNotInCart,
    DatabaseError,
}

impl std::error::Error for CartServiceError {}

impl std::fmt::Display for CartServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartServiceError::ProductNotFound => write!(f, "Product not found"),
            CartServiceError::ProductUnavailable(title) => {
                write!(f, "\"{}\" is no longer available", title)
            }
            CartServiceError::InvalidQuantity => {
                write!(f, "Quantity must be at least 1")
            }
            CartServiceError::ItemNotInCart => write!(f, "Item is not in the cart"),
            CartServiceError::DatabaseError => write!(f, "Database error"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum WalletServiceError {
    InvalidAmount,
    InsufficientFunds,
    DatabaseError,
}

impl std::error::Error for WalletServiceError {}

impl std::fmt::Display for WalletServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WalletServiceError::InvalidAmount => {
                write!(f, "Amount must be greater than zero")
            }
            WalletServiceError::InsufficientFunds => write!(f, "Insufficient balance"),
            WalletServiceError::DatabaseError => write!(f, "Database error"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum UserServiceError {
    UserNotFound,
    DatabaseError,
}

impl std::error::Error for UserServiceError {}

impl std::fmt::Display for UserServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserServiceError::UserNotFound => write!(f, "User not found"),
            UserServiceError::DatabaseError => write!(f, "Database error"),
        }
    }
}
