//! File submission: one multipart POST per file, then a page reload.
//!
//! [`submit_file`] is the whole lifecycle of a single submission.
//! [`Uploader`] spawns one of them per selected file, without waiting for
//! the previous ones.

use std::rc::Rc;

use futures::FutureExt;
use gloo_net::http::Request;
use web_sys::{File, FormData};

use crate::services::page::{PageReload, Reload, Spawn, WasmSpawner};
use crate::{AppError, AppResult, SelectedFile, UploadTarget, WidgetConfig};

/// Sends one file to an upload target.
#[allow(async_fn_in_trait)]
pub trait Transport {
    type File: SelectedFile;

    /// Post `file` as a multipart body under `target.field`.
    async fn post_file(&self, target: &UploadTarget, file: Self::File) -> AppResult<()>;
}

/// `fetch` through gloo-net with a `FormData` body.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    type File = File;

    async fn post_file(&self, target: &UploadTarget, file: File) -> AppResult<()> {
        let form_data = FormData::new()
            .map_err(|e| AppError::Request(format!("Failed to create FormData: {:?}", e)))?;

        form_data
            .append_with_blob_and_filename(&target.field, &file, &file.name())
            .map_err(|e| AppError::Request(format!("Failed to append file: {:?}", e)))?;

        let request = Request::post(&target.url)
            .body(form_data)
            .map_err(|e| AppError::Request(format!("Failed to build request: {}", e)))?;

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Network(format!("HTTP request failed: {}", e)))?;

        // The body is never read: whatever the server answers, the page reloads.
        log::debug!("{} answered {}", target.url, response.status());
        Ok(())
    }
}

/// Submit one file and reload the page once the request settles.
///
/// The outcome is intentionally discarded. A failed request is logged and
/// then treated exactly like a successful one.
pub async fn submit_file<T, R>(transport: &T, reloader: &R, target: &UploadTarget, file: T::File)
where
    T: Transport,
    R: Reload,
{
    let name = file.file_name();
    log::info!("📤 Uploading {} to {}", name, target.url);

    if let Err(e) = transport.post_file(target, file).await {
        log::warn!("Upload of {} failed (ignored): {}", name, e);
    }

    reloader.reload();
}

/// Fires one independent [`submit_file`] task per selected file.
pub struct Uploader<T, R, S> {
    transport: Rc<T>,
    reloader: Rc<R>,
    spawner: S,
    target: Rc<UploadTarget>,
}

impl<T, R, S: Clone> Clone for Uploader<T, R, S> {
    fn clone(&self) -> Self {
        Self {
            transport: Rc::clone(&self.transport),
            reloader: Rc::clone(&self.reloader),
            spawner: self.spawner.clone(),
            target: Rc::clone(&self.target),
        }
    }
}

impl<T, R, S> Uploader<T, R, S>
where
    T: Transport + 'static,
    T::File: 'static,
    R: Reload + 'static,
    S: Spawn,
{
    pub fn new(transport: Rc<T>, reloader: Rc<R>, spawner: S, target: UploadTarget) -> Self {
        Self {
            transport,
            reloader,
            spawner,
            target: Rc::new(target),
        }
    }

    pub fn target(&self) -> &UploadTarget {
        &self.target
    }

    /// Spawn the submission of a single file. Its result is not observable.
    pub fn submit(&self, file: T::File) {
        let transport = Rc::clone(&self.transport);
        let reloader = Rc::clone(&self.reloader);
        let target = Rc::clone(&self.target);

        self.spawner.spawn(
            async move {
                submit_file(&*transport, &*reloader, &target, file).await;
            }
            .boxed_local(),
        );
    }

    /// Submit every file in the order given. Returns how many were spawned.
    pub fn submit_all<I>(&self, files: I) -> usize
    where
        I: IntoIterator<Item = T::File>,
    {
        let mut count = 0;
        for file in files {
            self.submit(file);
            count += 1;
        }
        count
    }
}

/// The uploader wired to the real browser.
pub type BrowserUploader = Uploader<FetchTransport, PageReload, WasmSpawner>;

impl Uploader<FetchTransport, PageReload, WasmSpawner> {
    /// Build an uploader targeting the URL `config` resolves for the current page.
    pub fn for_page(config: &WidgetConfig) -> Self {
        let page_path = gloo_utils::window()
            .location()
            .pathname()
            .unwrap_or_default();

        Uploader::new(
            Rc::new(FetchTransport),
            Rc::new(PageReload),
            WasmSpawner,
            config.target(&page_path),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::{LocalPool, LocalSpawner};
    use futures::future::LocalBoxFuture;
    use futures::task::LocalSpawnExt;
    use std::cell::RefCell;

    #[derive(Clone, Debug)]
    struct MemoryFile {
        name: String,
        bytes: Vec<u8>,
    }

    impl MemoryFile {
        fn new(name: &str, bytes: &[u8]) -> Self {
            Self {
                name: name.to_string(),
                bytes: bytes.to_vec(),
            }
        }
    }

    impl SelectedFile for MemoryFile {
        fn file_name(&self) -> String {
            self.name.clone()
        }
    }

    #[derive(Debug, PartialEq)]
    struct Recorded {
        url: String,
        field: String,
        name: String,
        bytes: Vec<u8>,
    }

    type Journal = Rc<RefCell<Vec<String>>>;

    #[derive(Default)]
    struct RecordingTransport {
        requests: RefCell<Vec<Recorded>>,
        journal: Journal,
        failing: Vec<&'static str>,
        stalled: Vec<&'static str>,
    }

    impl Transport for RecordingTransport {
        type File = MemoryFile;

        async fn post_file(&self, target: &UploadTarget, file: MemoryFile) -> AppResult<()> {
            if self.stalled.iter().any(|s| *s == file.name) {
                futures::future::pending::<()>().await;
            }

            self.journal.borrow_mut().push(format!("POST {}", file.name));
            self.requests.borrow_mut().push(Recorded {
                url: target.url.clone(),
                field: target.field.clone(),
                name: file.name.clone(),
                bytes: file.bytes,
            });

            if self.failing.iter().any(|s| *s == file.name) {
                return Err(AppError::Network("connection refused".to_string()));
            }
            Ok(())
        }
    }

    struct JournalReload {
        journal: Journal,
    }

    impl Reload for JournalReload {
        fn reload(&self) {
            self.journal.borrow_mut().push("reload".to_string());
        }
    }

    impl Spawn for LocalSpawner {
        fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
            self.spawn_local(task).expect("local pool is alive");
        }
    }

    struct Harness {
        pool: LocalPool,
        uploader: Uploader<RecordingTransport, JournalReload, LocalSpawner>,
        transport: Rc<RecordingTransport>,
        journal: Journal,
    }

    fn harness(failing: Vec<&'static str>, stalled: Vec<&'static str>) -> Harness {
        let pool = LocalPool::new();
        let journal = Journal::default();
        let transport = Rc::new(RecordingTransport {
            journal: Rc::clone(&journal),
            failing,
            stalled,
            ..Default::default()
        });
        let reloader = Rc::new(JournalReload {
            journal: Rc::clone(&journal),
        });
        let target = WidgetConfig::default().target("/");
        let uploader = Uploader::new(Rc::clone(&transport), reloader, pool.spawner(), target);

        Harness {
            pool,
            uploader,
            transport,
            journal,
        }
    }

    fn reloads(journal: &Journal) -> usize {
        journal.borrow().iter().filter(|e| *e == "reload").count()
    }

    /// Every reload must be preceded by a request that settled.
    fn assert_reload_follows_each_post(journal: &Journal) {
        let mut pending = 0i32;
        for entry in journal.borrow().iter() {
            if entry == "reload" {
                pending -= 1;
                assert!(pending >= 0, "reload before its request: {:?}", journal.borrow());
            } else {
                pending += 1;
            }
        }
        assert_eq!(pending, 0, "request without reload: {:?}", journal.borrow());
    }

    #[test]
    fn test_dropping_two_files_posts_each_then_reloads() {
        let mut h = harness(vec![], vec![]);
        let files = vec![
            MemoryFile::new("a.txt", b"hello from a"),
            MemoryFile::new("b.png", &[0x89, b'P', b'N', b'G']),
        ];

        assert_eq!(h.uploader.submit_all(files), 2);
        h.pool.run();

        let requests = h.transport.requests.borrow();
        assert_eq!(
            *requests,
            vec![
                Recorded {
                    url: "/upload".to_string(),
                    field: "file".to_string(),
                    name: "a.txt".to_string(),
                    bytes: b"hello from a".to_vec(),
                },
                Recorded {
                    url: "/upload".to_string(),
                    field: "file".to_string(),
                    name: "b.png".to_string(),
                    bytes: vec![0x89, b'P', b'N', b'G'],
                },
            ]
        );
        assert_eq!(reloads(&h.journal), 2);
        assert_reload_follows_each_post(&h.journal);
    }

    #[test]
    fn test_picking_one_file_posts_once_then_reloads() {
        let mut h = harness(vec![], vec![]);

        assert_eq!(h.uploader.submit_all([MemoryFile::new("c.pdf", b"%PDF-1.7")]), 1);
        h.pool.run();

        let requests = h.transport.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].field, "file");
        assert_eq!(requests[0].bytes, b"%PDF-1.7");
        assert_eq!(*h.journal.borrow(), vec!["POST c.pdf", "reload"]);
    }

    #[test]
    fn test_n_files_issue_n_requests() {
        let mut h = harness(vec![], vec![]);
        let files: Vec<_> = (0..7)
            .map(|i| MemoryFile::new(&format!("f{}.bin", i), &[i as u8]))
            .collect();

        assert_eq!(h.uploader.submit_all(files), 7);
        h.pool.run();

        let requests = h.transport.requests.borrow();
        assert_eq!(requests.len(), 7);
        for (i, request) in requests.iter().enumerate() {
            assert_eq!(request.name, format!("f{}.bin", i));
            assert_eq!(request.bytes, vec![i as u8]);
        }
        assert_eq!(reloads(&h.journal), 7);
    }

    #[test]
    fn test_zero_files_issue_nothing() {
        let mut h = harness(vec![], vec![]);

        assert_eq!(h.uploader.submit_all(Vec::new()), 0);
        h.pool.run();

        assert!(h.transport.requests.borrow().is_empty());
        assert!(h.journal.borrow().is_empty());
    }

    #[test]
    fn test_failed_upload_still_reloads() {
        let mut h = harness(vec!["broken.bin"], vec![]);

        h.uploader.submit(MemoryFile::new("broken.bin", b"x"));
        h.pool.run();

        assert_eq!(h.transport.requests.borrow().len(), 1);
        assert_eq!(*h.journal.borrow(), vec!["POST broken.bin", "reload"]);
    }

    #[test]
    fn test_stalled_upload_does_not_block_the_next() {
        let mut h = harness(vec![], vec!["stuck.iso"]);

        h.uploader.submit_all([
            MemoryFile::new("stuck.iso", b"never finishes"),
            MemoryFile::new("d.txt", b"d"),
        ]);
        h.pool.run_until_stalled();

        let requests = h.transport.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].name, "d.txt");
        assert_eq!(*h.journal.borrow(), vec!["POST d.txt", "reload"]);
    }

    #[test]
    fn test_submit_file_reloads_after_request() {
        let journal = Journal::default();
        let transport = RecordingTransport {
            journal: Rc::clone(&journal),
            ..Default::default()
        };
        let reloader = JournalReload {
            journal: Rc::clone(&journal),
        };
        let target = UploadTarget {
            url: "/upload/music".to_string(),
            field: "file".to_string(),
        };

        futures::executor::block_on(submit_file(
            &transport,
            &reloader,
            &target,
            MemoryFile::new("song.flac", b"fLaC"),
        ));

        assert_eq!(*journal.borrow(), vec!["POST song.flac", "reload"]);
        assert_eq!(transport.requests.borrow()[0].url, "/upload/music");
    }

    #[test]
    fn test_clone_shares_target() {
        let h = harness(vec![], vec![]);
        let other = h.uploader.clone();
        assert_eq!(other.target(), h.uploader.target());
        assert_eq!(other.target().url, "/upload");
    }
}
